//! Reply texts sent back to the chat.

use crate::books::BookRecord;

pub const BOOKS_HEADER: &str = "Here are top books from the internet:\n";
pub const NO_TOPICS_REPLY: &str = "I couldn't extract any topics from your query. Please try again.";
pub const NO_BOOKS_REPLY: &str = "Sorry, I couldn't find any books on that topic.";

/// Header plus one block per record, in the given order. Empty input still returns the header alone;
/// callers use [`NO_BOOKS_REPLY`] for that case.
pub fn format_books(books: &[BookRecord]) -> String {
    let mut out = String::from(BOOKS_HEADER);
    for book in books {
        out.push_str("-- ");
        out.push_str(&book.title);
        out.push_str(" by ");
        out.push_str(&book.authors.join(", "));
        out.push_str("\nLink(");
        out.push_str(&book.link);
        out.push_str(")\n\n");
    }
    out
}
