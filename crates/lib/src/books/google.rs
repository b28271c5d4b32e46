//! Google Books volumes API client (https://www.googleapis.com/books/v1/volumes by default).

use super::{BookRecord, BookSearch};
use async_trait::async_trait;
use serde::Deserialize;

/// Result-count ceiling sent with every query.
pub const MAX_RESULTS: u32 = 10;

/// Client for the volumes search endpoint.
#[derive(Clone)]
pub struct GoogleBooksClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum BooksError {
    #[error("book search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("book search api error: {status} {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Default, Deserialize)]
struct Volume {
    #[serde(default, rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    info_link: Option<String>,
}

impl From<Volume> for BookRecord {
    fn from(v: Volume) -> Self {
        let info = v.volume_info;
        BookRecord::from_parts(info.title, info.authors, info.info_link)
    }
}

impl GoogleBooksClient {
    /// `base_url` is the full volumes endpoint; a `reqwest::Client` is passed in so the timeout and pool are shared.
    pub fn new(base_url: String, api_key: String, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    /// GET volumes?q=..&maxResults=10&printType=books&key=.. and map every returned item.
    pub async fn try_search(&self, query: &str) -> Result<Vec<BookRecord>, BooksError> {
        let max_results = MAX_RESULTS.to_string();
        let res = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("printType", "books"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            // The URL carries the API key; keep it out of error messages.
            .map_err(|e| BooksError::Request(e.without_url()))?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(BooksError::Api { status, body });
        }
        let bytes = res
            .bytes()
            .await
            .map_err(|e| BooksError::Request(e.without_url()))?;
        Ok(parse_volumes(&bytes))
    }
}

/// Map a volumes response body to records. A body that is not a volumes object yields nothing.
fn parse_volumes(body: &[u8]) -> Vec<BookRecord> {
    match serde_json::from_slice::<VolumesResponse>(body) {
        Ok(data) => data.items.into_iter().map(BookRecord::from).collect(),
        Err(e) => {
            log::warn!("book search: unreadable response body: {}", e);
            Vec::new()
        }
    }
}

#[async_trait]
impl BookSearch for GoogleBooksClient {
    async fn search(&self, query: &str) -> Vec<BookRecord> {
        match self.try_search(query).await {
            Ok(books) => {
                log::debug!("book search: {} result(s) for {:?}", books.len(), query);
                books
            }
            Err(e) => {
                log::error!("Error fetching books: {}", e);
                Vec::new()
            }
        }
    }
}
