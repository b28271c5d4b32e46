//! Per-update pipeline: extract topics, search books, format, send.

use crate::books::BookSearch;
use crate::channels::{ReplySender, TelegramUpdate};
use crate::config::Config;
use crate::nlp::KeywordExtractor;
use crate::reply::{format_books, NO_BOOKS_REPLY, NO_TOPICS_REPLY};
use std::sync::Arc;

/// Shared state for the webhook (config plus the three collaborators). Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: Arc<dyn KeywordExtractor>,
    pub books: Arc<dyn BookSearch>,
    pub sender: Arc<dyn ReplySender>,
}

/// Reply text for one user message. Search is skipped entirely when no topics are found.
pub async fn build_reply(
    extractor: &dyn KeywordExtractor,
    books: &dyn BookSearch,
    text: &str,
) -> String {
    let keywords = extractor.extract(text);
    if keywords.is_empty() {
        log::info!("no topics extracted");
        return NO_TOPICS_REPLY.to_string();
    }
    let query = keywords.join(" ");
    log::info!("searching books for {:?}", query);
    let found = books.search(&query).await;
    if found.is_empty() {
        NO_BOOKS_REPLY.to_string()
    } else {
        format_books(&found)
    }
}

/// Handle one update. Updates without a text message and chat id are ignored. Sends at most one reply.
pub async fn handle_update(state: &AppState, update: &TelegramUpdate) {
    let Some((chat_id, text)) = update.text_message() else {
        log::debug!("ignoring update {:?}: no text message", update.update_id);
        return;
    };
    let reply = build_reply(state.extractor.as_ref(), state.books.as_ref(), text).await;
    state.sender.send_reply(chat_id, &reply).await;
}
