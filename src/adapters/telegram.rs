//! Telegram Notifier Adapter
//!
//! Delivers alert payloads through the Telegram Bot API `sendMessage`
//! method with Markdown parse mode. One bot, one chat, fire-and-forget.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::ports::notifier::{Notifier, NotifyError};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Telegram Bot API notifier
pub struct TelegramNotifier {
    http: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a notifier for the given bot token and chat id.
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        Self::with_api_base(TELEGRAM_API_BASE, bot_token, chat_id)
    }

    /// Create against a non-default API host (used by tests).
    pub fn with_api_base(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let bot_token = bot_token.into();
        let chat_id = chat_id.into();

        if bot_token.is_empty() {
            return Err(NotifyError::Config("telegram bot token is empty".into()));
        }
        if chat_id.is_empty() {
            return Err(NotifyError::Config("telegram chat id is empty".into()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.into(),
            bot_token,
            chat_id,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };

        let response = self
            .http
            .post(self.send_message_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_creation() {
        let notifier = TelegramNotifier::new("123456:token", "-100123");
        assert!(notifier.is_ok());
        assert_eq!(notifier.unwrap().name(), "telegram");
    }

    #[test]
    fn test_rejects_empty_credentials() {
        assert!(matches!(
            TelegramNotifier::new("", "-100123"),
            Err(NotifyError::Config(_))
        ));
        assert!(matches!(
            TelegramNotifier::new("123456:token", ""),
            Err(NotifyError::Config(_))
        ));
    }

    #[test]
    fn test_send_message_url() {
        let notifier =
            TelegramNotifier::with_api_base("https://example.com/", "123456:token", "-100123")
                .unwrap();
        assert_eq!(
            notifier.send_message_url(),
            "https://example.com/bot123456:token/sendMessage"
        );
    }

    #[test]
    fn test_request_payload_shape() {
        let request = SendMessageRequest {
            chat_id: "-100123",
            text: "hello",
            parse_mode: "Markdown",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["chat_id"], "-100123");
        assert_eq!(json["parse_mode"], "Markdown");
    }
}
