//! Message dispatcher - Routes inbound text through parser, interpreter and formatter

use std::sync::Arc;

use super::formatter::ReplyFormatter;
use super::parser::CommandParser;
use crate::application::errors::BotError;
use crate::application::services::CommandInterpreter;
use crate::domain::entities::{InboundMessage, OutboundMessage};
use crate::domain::traits::ReplySender;

/// Turns one inbound message into zero or more replies
pub struct MessageDispatcher {
    parser: CommandParser,
    interpreter: Arc<CommandInterpreter>,
    formatter: ReplyFormatter,
}

impl MessageDispatcher {
    pub fn new(interpreter: Arc<CommandInterpreter>) -> Self {
        Self {
            parser: CommandParser::new(),
            interpreter,
            formatter: ReplyFormatter::new(),
        }
    }

    /// Run every command found in `text`, one reply per command, in order
    pub async fn dispatch(&self, text: &str) -> Vec<OutboundMessage> {
        let mut replies = Vec::new();
        for command in self.parser.parse(text) {
            let outcome = self.interpreter.handle(&command).await;
            replies.push(self.formatter.format(&outcome));
        }
        replies
    }

    /// Dispatch a message and send the replies, if any, through `sender`
    pub async fn process(
        &self,
        message: &InboundMessage,
        sender: &dyn ReplySender,
    ) -> Result<usize, BotError> {
        let preview: String = message.text.chars().take(50).collect();
        tracing::debug!(
            "[{}] {} from {:?} at {}",
            message.platform,
            preview,
            message.sender_id,
            message.timestamp
        );

        let replies = self.dispatch(&message.text).await;
        if replies.is_empty() {
            return Ok(0);
        }

        sender.reply(&message.reply_token, &replies).await?;
        tracing::info!("[{}] Sent {} replies", message.platform, replies.len());
        Ok(replies.len())
    }
}
