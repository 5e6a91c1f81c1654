//! LINE Messaging API reply client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use super::flex::to_line_message;
use crate::application::errors::{BotError, TransportError};
use crate::domain::entities::OutboundMessage;
use crate::domain::traits::{BotInfo, ReplySender};

/// Most messages a single reply request may carry
pub const MAX_MESSAGES_PER_REPLY: usize = 5;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct LineClient {
    client: Client,
    access_token: String,
    api_base: String,
    info: BotInfo,
}

impl LineClient {
    pub fn new(access_token: impl Into<String>, api_base: impl Into<String>) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            access_token: access_token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            info: BotInfo {
                id: "line".to_string(),
                name: "dinner-bot".to_string(),
                platform: "line".to_string(),
            },
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.info.name = name.into();
        self
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v2/bot/{}", self.api_base, path)
    }
}

/// The messages that fit in one reply request. A reply token is single-use,
/// so the rest are dropped.
fn capped(messages: &[OutboundMessage]) -> &[OutboundMessage] {
    if messages.len() > MAX_MESSAGES_PER_REPLY {
        tracing::warn!(
            "Dropping {} replies over the per-request limit",
            messages.len() - MAX_MESSAGES_PER_REPLY
        );
        &messages[..MAX_MESSAGES_PER_REPLY]
    } else {
        messages
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, messages: &[OutboundMessage]) -> Result<(), BotError> {
        let messages = capped(messages);
        let body = json!({
            "replyToken": reply_token,
            "messages": messages.iter().map(to_line_message).collect::<Vec<_>>(),
        });

        let response = self
            .client
            .post(self.api_url("message/reply"))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
