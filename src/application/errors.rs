//! Application layer errors

use std::time::Duration;
use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl StorageError {
    /// Whether retrying the same request later may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorageError::Timeout(_))
    }
}

/// Transport errors, raised at the webhook boundary or when replying
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Signature mismatch")]
    Signature,

    #[error("Missing header: {0}")]
    MissingHeader(String),

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_timeouts_are_retryable() {
        assert!(StorageError::Timeout(Duration::from_secs(1)).is_retryable());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!StorageError::Io(io).is_retryable());
    }

    #[test]
    fn test_bot_error_wraps_sources() {
        let err: BotError = ConfigError::MissingField("LINE_CHANNEL_SECRET".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field: LINE_CHANNEL_SECRET"
        );
    }
}
