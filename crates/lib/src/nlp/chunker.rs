//! Rule-based noun-phrase chunker.
//!
//! Text is split into word tokens; punctuation closes the current clause. Each word is
//! classified against the [`Lexicon`] and every maximal run of content words becomes one
//! chunk, returned as the exact source span so spacing and casing are preserved.

use super::lexicon::{Lexicon, WordClass};
use super::KeywordExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Byte range of a word in the source text.
    Word { start: usize, end: usize },
    /// Punctuation or any other non-word, non-space character.
    Break,
}

fn is_inner_joiner(c: char) -> bool {
    c == '\'' || c == '\u{2019}' || c == '-'
}

/// Split text into words and clause breaks. Apostrophes and hyphens stay inside a word
/// only when both neighbours are alphanumeric ("don't", "sci-fi").
fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let (start, c) = chars[i];
        if c.is_alphanumeric() {
            let mut j = i + 1;
            while j < chars.len() {
                let (_, cj) = chars[j];
                let next_is_alnum = chars
                    .get(j + 1)
                    .map(|(_, n)| n.is_alphanumeric())
                    .unwrap_or(false);
                if cj.is_alphanumeric() || (is_inner_joiner(cj) && next_is_alnum) {
                    j += 1;
                } else {
                    break;
                }
            }
            let end = chars.get(j).map(|(b, _)| *b).unwrap_or(text.len());
            tokens.push(Token::Word { start, end });
            i = j;
        } else {
            if !c.is_whitespace() && tokens.last() != Some(&Token::Break) {
                tokens.push(Token::Break);
            }
            i += 1;
        }
    }
    tokens
}

/// Noun-phrase chunker over a closed-class English lexicon.
#[derive(Debug, Clone, Default)]
pub struct NounPhraseChunker {
    lexicon: Lexicon,
}

impl NounPhraseChunker {
    /// Chunk spans as byte ranges into `text`, in source order.
    fn chunk_spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut current: Option<(usize, usize)> = None;
        let mut prev: Option<WordClass> = None;
        for token in tokenize(text) {
            match token {
                Token::Word { start, end } => {
                    let class = self.lexicon.classify(&text[start..end], prev);
                    prev = Some(class);
                    if class == WordClass::Content {
                        current = Some(match current {
                            Some((s, _)) => (s, end),
                            None => (start, end),
                        });
                    } else if let Some(span) = current.take() {
                        spans.push(span);
                    }
                }
                Token::Break => {
                    prev = None;
                    if let Some(span) = current.take() {
                        spans.push(span);
                    }
                }
            }
        }
        if let Some(span) = current {
            spans.push(span);
        }
        spans
    }
}

impl KeywordExtractor for NounPhraseChunker {
    fn extract(&self, text: &str) -> Vec<String> {
        self.chunk_spans(text)
            .into_iter()
            .map(|(s, e)| text[s..e].to_string())
            .collect()
    }
}
