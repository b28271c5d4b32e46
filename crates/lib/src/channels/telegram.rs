//! Telegram channel: webhook update payloads and Bot API calls (sendMessage, setWebhook, deleteWebhook).

use super::sender::{ChatId, ReplySender};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

/// Telegram update payload (webhook POST body). Every field is optional so any JSON object parses.
#[derive(Debug, Default, Deserialize)]
pub struct TelegramUpdate {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    #[serde(default)]
    pub chat: Option<TelegramChat>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: ChatId,
}

impl TelegramUpdate {
    /// Chat id and text when this update is a text message; None for every other update kind.
    pub fn text_message(&self) -> Option<(&ChatId, &str)> {
        let msg = self.message.as_ref()?;
        let text = msg.text.as_deref()?;
        let chat = msg.chat.as_ref()?;
        Some((&chat.id, text))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("telegram request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("telegram {method} failed: {status} {body}")]
    Api {
        method: &'static str,
        status: StatusCode,
        body: String,
    },
}

/// Telegram Bot API client bound to one bot token.
pub struct TelegramChannel {
    token: String,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(token: String, api_base: String, client: reqwest::Client) -> Self {
        Self {
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// POST a JSON body to a Bot API method. Only 200 counts as success.
    async fn call(
        &self,
        method: &'static str,
        body: &serde_json::Value,
    ) -> Result<(), TelegramError> {
        let res = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            // The URL carries the bot token; keep it out of error messages.
            .map_err(|e| TelegramError::Request(e.without_url()))?;
        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(TelegramError::Api {
                method,
                status,
                body,
            });
        }
        Ok(())
    }

    /// Send a text message to a chat via sendMessage API.
    pub async fn send_message(&self, chat_id: &ChatId, text: &str) -> Result<(), TelegramError> {
        let body = serde_json::json!({ "chat_id": chat_id, "text": text });
        self.call("sendMessage", &body).await
    }

    /// Set webhook URL. Telegram then POSTs updates to it instead of queueing them for getUpdates.
    pub async fn set_webhook(&self, url: &str) -> Result<(), TelegramError> {
        let body = serde_json::json!({ "url": url });
        self.call("setWebhook", &body).await
    }

    /// Remove the registered webhook.
    pub async fn delete_webhook(&self) -> Result<(), TelegramError> {
        self.call("deleteWebhook", &serde_json::json!({})).await
    }
}

#[async_trait]
impl ReplySender for TelegramChannel {
    async fn send_reply(&self, chat_id: &ChatId, text: &str) {
        match self.send_message(chat_id, text).await {
            Ok(()) => log::info!("Message sent successfully to {}", chat_id),
            Err(TelegramError::Api { status, body, .. }) => {
                log::error!("Failed to send message, status: {}", status.as_u16());
                log::debug!("sendMessage error body: {}", body);
            }
            Err(e) => log::error!("Failed to send message to {}: {}", chat_id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_update_parses() {
        let u: TelegramUpdate = serde_json::from_str(
            r#"{"update_id": 1, "message": {"message_id": 5, "chat": {"id": 42, "type": "private"}, "text": "hi"}}"#,
        )
        .unwrap();
        let (chat, text) = u.text_message().expect("text message");
        assert_eq!(chat, &ChatId::Id(42));
        assert_eq!(text, "hi");
    }

    #[test]
    fn non_text_updates_are_skipped() {
        let photo: TelegramUpdate =
            serde_json::from_str(r#"{"update_id": 2, "message": {"chat": {"id": 1}, "photo": []}}"#)
                .unwrap();
        assert!(photo.text_message().is_none());

        let edited: TelegramUpdate =
            serde_json::from_str(r#"{"update_id": 3, "edited_message": {"text": "x"}}"#).unwrap();
        assert!(edited.text_message().is_none());

        let empty: TelegramUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.text_message().is_none());
    }

    #[test]
    fn text_without_chat_is_skipped() {
        let u: TelegramUpdate = serde_json::from_str(r#"{"message": {"text": "hello"}}"#).unwrap();
        assert!(u.text_message().is_none());
    }

    #[test]
    fn empty_text_is_still_a_text_message() {
        let u: TelegramUpdate =
            serde_json::from_str(r#"{"message": {"chat": {"id": 9}, "text": ""}}"#).unwrap();
        assert_eq!(u.text_message().map(|(_, t)| t), Some(""));
    }

    #[test]
    fn method_url_layout() {
        let ch = TelegramChannel::new(
            "123:abc".to_string(),
            "http://127.0.0.1:9/".to_string(),
            reqwest::Client::new(),
        );
        assert_eq!(ch.method_url("sendMessage"), "http://127.0.0.1:9/bot123:abc/sendMessage");
    }
}
