//! Keyword extraction: noun-phrase chunks used as search topics.
//!
//! The extractor is built once at startup and shared read-only across requests.

mod chunker;
mod lexicon;

pub use chunker::NounPhraseChunker;

/// Turns free text into an ordered list of topic phrases. Empty output is a valid answer, not an error.
pub trait KeywordExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<String>;
}
