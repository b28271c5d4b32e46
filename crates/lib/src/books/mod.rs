//! Book catalog lookup.
//!
//! [`BookSearch`] is the fail-soft seam the webhook handler calls; [`GoogleBooksClient`]
//! is the production implementation against the Google Books volumes API.

mod google;

pub use google::{BooksError, GoogleBooksClient, MAX_RESULTS};

use async_trait::async_trait;

pub const DEFAULT_TITLE: &str = "No Title";
pub const DEFAULT_AUTHOR: &str = "Unknown Author";
pub const DEFAULT_LINK: &str = "No Link Available";

/// One search hit, with defaults already filled in for missing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub link: String,
}

impl BookRecord {
    /// Build a record from optional catalog fields. An empty author list counts as missing.
    pub fn from_parts(
        title: Option<String>,
        authors: Option<Vec<String>>,
        link: Option<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            authors: authors
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| vec![DEFAULT_AUTHOR.to_string()]),
            link: link.unwrap_or_else(|| DEFAULT_LINK.to_string()),
        }
    }
}

/// Free-text book lookup. Never fails: an unreachable or erroring catalog yields no records.
#[async_trait]
pub trait BookSearch: Send + Sync {
    async fn search(&self, query: &str) -> Vec<BookRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let r = BookRecord::from_parts(None, None, None);
        assert_eq!(r.title, "No Title");
        assert_eq!(r.authors, vec!["Unknown Author".to_string()]);
        assert_eq!(r.link, "No Link Available");
    }

    #[test]
    fn empty_author_list_counts_as_missing() {
        let r = BookRecord::from_parts(Some("Dune".into()), Some(vec![]), None);
        assert_eq!(r.title, "Dune");
        assert_eq!(r.authors, vec!["Unknown Author".to_string()]);
    }

    #[test]
    fn present_fields_are_kept() {
        let r = BookRecord::from_parts(
            Some("Good Omens".into()),
            Some(vec!["Terry Pratchett".into(), "Neil Gaiman".into()]),
            Some("http://example.com/omens".into()),
        );
        assert_eq!(r.authors.len(), 2);
        assert_eq!(r.link, "http://example.com/omens");
    }
}
