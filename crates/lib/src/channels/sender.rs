//! Outbound reply seam: chat identifiers and the fire-and-log sender trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque chat identifier: numeric chat id or a public `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{}", id),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

/// Delivers one text message to one chat. Failures are logged by the implementation, never returned.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send_reply(&self, chat_id: &ChatId, text: &str);
}
