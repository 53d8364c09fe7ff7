//! Telegram Bot API notifier

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::Notifier;
use crate::BotError;

/// Sends messages to one chat through the Telegram Bot API
pub struct TelegramNotifier {
    send_message_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        let TelegramConfig {
            api_url,
            token,
            chat_id,
        } = config;

        tracing::debug!("Created TelegramNotifier for chat {}", chat_id);

        Self {
            send_message_url: format!(
                "{}/bot{}/sendMessage",
                api_url.trim_end_matches('/'),
                token
            ),
            chat_id: chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, text: &str) -> crate::Result<()> {
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let response = self
            .http
            .post_json(&self.send_message_url, &body)
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;

        if response.status != 200 {
            return Err(BotError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        tracing::info!("Message is sent");
        Ok(())
    }
}
