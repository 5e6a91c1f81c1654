use async_trait::async_trait;
use crate::domain::entities::OutboundMessage;
use crate::application::errors::BotError;

/// Reply transport - abstraction for messaging platform adapters
#[async_trait]
pub trait ReplySender: Send + Sync {
    /// Send all messages produced for one inbound event
    async fn reply(&self, reply_token: &str, messages: &[OutboundMessage]) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub platform: String,
}
