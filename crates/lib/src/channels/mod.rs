//! Communication channels (Telegram).
//!
//! Inbound updates arrive via the webhook; replies leave through a [`ReplySender`].

mod sender;
mod telegram;

pub use sender::{ChatId, ReplySender};
pub use telegram::{TelegramChannel, TelegramChat, TelegramError, TelegramMessage, TelegramUpdate};
