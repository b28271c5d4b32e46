//! In-memory collaborators for pipeline tests.

use super::AppState;
use crate::books::{BookRecord, BookSearch};
use crate::channels::{ChatId, ReplySender};
use crate::config::Config;
use crate::nlp::KeywordExtractor;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub(crate) struct FixedExtractor(pub Vec<String>);

impl KeywordExtractor for FixedExtractor {
    fn extract(&self, _text: &str) -> Vec<String> {
        self.0.clone()
    }
}

/// Returns canned results and records every query.
#[derive(Default)]
pub(crate) struct FakeBooks {
    pub results: Vec<BookRecord>,
    pub queries: Mutex<Vec<String>>,
}

#[async_trait]
impl BookSearch for FakeBooks {
    async fn search(&self, query: &str) -> Vec<BookRecord> {
        self.queries.lock().unwrap().push(query.to_string());
        self.results.clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingSender {
    pub sent: Mutex<Vec<(ChatId, String)>>,
}

#[async_trait]
impl ReplySender for RecordingSender {
    async fn send_reply(&self, chat_id: &ChatId, text: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.clone(), text.to_string()));
    }
}

pub(crate) struct Harness {
    pub state: AppState,
    pub books: Arc<FakeBooks>,
    pub sender: Arc<RecordingSender>,
}

pub(crate) fn harness(keywords: &[&str], results: Vec<BookRecord>) -> Harness {
    let books = Arc::new(FakeBooks {
        results,
        ..Default::default()
    });
    let sender = Arc::new(RecordingSender::default());
    let state = AppState {
        config: Arc::new(Config::default()),
        extractor: Arc::new(FixedExtractor(
            keywords.iter().map(|s| s.to_string()).collect(),
        )),
        books: books.clone(),
        sender: sender.clone(),
    };
    Harness {
        state,
        books,
        sender,
    }
}
