//! Telegram Bot API notification sink.
//!
//! Delivers messages to a fixed chat via `sendMessage`.
//!
//! API docs: https://core.telegram.org/bots/api#sendmessage
//! Auth: bot token embedded in the URL path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::NotificationSink;
use crate::types::ScanError;

const SINK_NAME: &str = "telegram";

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Response envelope shared by all Bot API methods.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    http: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), bot_token, chat_id)
    }

    /// Construct against a non-default API host (used in tests).
    pub fn with_base_url(base_url: String, bot_token: String, chat_id: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("PROSPECTOR/0.1.0")
            .build()
            .context("Failed to build HTTP client for Telegram")?;

        Ok(Self {
            http,
            base_url,
            bot_token,
            chat_id,
        })
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": message,
        });

        debug!(chat_id = %self.chat_id, chars = message.len(), "Sending Telegram message");

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Telegram sendMessage request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ScanError::Notification(format!("HTTP {status}: {body}")).into());
        }

        let api: BotApiResponse = resp
            .json()
            .await
            .context("Failed to parse Telegram sendMessage response")?;

        if !api.ok {
            let reason = api.description.unwrap_or_else(|| "unknown error".to_string());
            return Err(ScanError::Notification(reason).into());
        }

        info!(chat_id = %self.chat_id, "Telegram message delivered");
        Ok(())
    }

    fn name(&self) -> &str {
        SINK_NAME
    }
}
