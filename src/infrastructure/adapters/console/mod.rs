//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use crate::domain::entities::OutboundMessage;
use crate::domain::traits::{BotInfo, ReplySender};
use crate::application::errors::BotError;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "dinner-bot".to_string(),
                platform: "console".to_string(),
            },
        }
    }

    /// Prompt and read one line; `None` at end of input
    pub async fn read_line(&self, input: &mut BufReader<Stdin>, prompt: &str) -> Option<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await.ok()?;
        stdout.flush().await.ok()?;

        let mut line = String::new();
        match input.read_line(&mut line).await {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    /// Plain-text rendering of a reply
    pub fn render(message: &OutboundMessage) -> String {
        match message {
            OutboundMessage::Text(text) => format!("[BOT] {}", text),
            OutboundMessage::Menu(menu) => {
                let mut out = format!("[BOT] {}\n      {}\n      ----", menu.title, menu.subtitle);
                let row: Vec<String> = menu
                    .buttons
                    .iter()
                    .map(|b| format!("{} -> {}", b.label, b.text))
                    .collect();
                out.push_str(&format!("\n  [Buttons] {}", row.join(" | ")));
                out
            }
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplySender for ConsoleAdapter {
    async fn reply(&self, _reply_token: &str, messages: &[OutboundMessage]) -> Result<(), BotError> {
        for message in messages {
            println!("{}", Self::render(message));
        }
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
