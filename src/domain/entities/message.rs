use chrono::{DateTime, TimeZone, Utc};

/// An incoming text message, already verified by the transport
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Token used to address the reply
    pub reply_token: String,
    pub text: String,
    pub sender_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl InboundMessage {
    pub fn new(reply_token: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reply_token: reply_token.into(),
            text: text.into(),
            sender_id: None,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn with_sender(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set the event time from a unix timestamp in milliseconds
    pub fn with_timestamp_millis(mut self, millis: i64) -> Self {
        if let Some(ts) = Utc.timestamp_millis_opt(millis).single() {
            self.timestamp = ts;
        }
        self
    }
}

/// A button on the category menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    /// Text sent back as a message when the button is pressed
    pub text: String,
    pub color: String,
}

/// Interactive menu: title, subtitle, separator, then a column of buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPayload {
    pub alt_text: String,
    pub title: String,
    pub subtitle: String,
    pub buttons: Vec<MenuButton>,
}

/// Message handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Text(String),
    Menu(MenuPayload),
}

impl OutboundMessage {
    pub fn text(&self) -> Option<&str> {
        match self {
            OutboundMessage::Text(s) => Some(s),
            OutboundMessage::Menu(_) => None,
        }
    }

    pub fn is_menu(&self) -> bool {
        matches!(self, OutboundMessage::Menu(_))
    }
}
