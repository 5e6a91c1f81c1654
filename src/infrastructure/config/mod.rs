//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;

pub const ENV_ACCESS_TOKEN: &str = "LINE_CHANNEL_ACCESS_TOKEN";
pub const ENV_CHANNEL_SECRET: &str = "LINE_CHANNEL_SECRET";
pub const ENV_LIST_DIR: &str = "DINNER_BOT_LIST_DIR";
pub const ENV_PORT: &str = "PORT";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub line: LineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Directory holding the list files
    pub directory: PathBuf,
    /// Bound on a single read or write
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LineConfig {
    pub access_token: Option<String>,
    pub channel_secret: Option<String>,
    pub api_base: String,
}

/// Both LINE secrets, present and non-empty
#[derive(Debug, Clone)]
pub struct LineCredentials {
    pub access_token: String,
    pub channel_secret: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "dinner-bot".to_string(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            storage: StorageConfig {
                directory: PathBuf::from("list"),
                timeout_ms: 5000,
            },
            line: LineConfig {
                access_token: None,
                channel_secret: None,
                api_base: "https://api.line.me".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Defaults when `path` does not exist; a file that exists must parse
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::load(path)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Override fields from environment variables
    pub fn apply_env(&mut self) {
        self.apply_vars(|name| std::env::var(name).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(token) = var(ENV_ACCESS_TOKEN) {
            self.line.access_token = Some(token);
        }

        if let Some(secret) = var(ENV_CHANNEL_SECRET) {
            self.line.channel_secret = Some(secret);
        }

        if let Some(dir) = var(ENV_LIST_DIR) {
            self.storage.directory = PathBuf::from(dir);
        }

        if let Some(port) = var(ENV_PORT) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", ENV_PORT, port),
            }
        }
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage.timeout_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The webhook service needs both secrets to start
    pub fn line_credentials(&self) -> Result<LineCredentials, ConfigError> {
        let access_token = non_empty(&self.line.access_token)
            .ok_or_else(|| ConfigError::MissingField(ENV_ACCESS_TOKEN.to_string()))?;
        let channel_secret = non_empty(&self.line.channel_secret)
            .ok_or_else(|| ConfigError::MissingField(ENV_CHANNEL_SECRET.to_string()))?;

        Ok(LineCredentials {
            access_token,
            channel_secret,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue("storage.timeout-ms must be positive".to_string()));
        }
        if self.storage.directory.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("storage.directory is empty".to_string()));
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
