//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::homework::StatusCatalog;

/// Environment variable holding the review API token
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the destination chat id
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub statuses: StatusCatalog,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Homework review API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
        }
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub chat_id: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
            token: String::new(),
            chat_id: String::new(),
        }
    }
}

/// Poll loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
        }
    }
}

/// Log sinks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file path; `null` disables the file sink
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
    /// Size at which the file is rotated
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    /// Rotated files kept next to the live one
    #[serde(default = "default_backup_count")]
    pub backup_count: usize,
    #[serde(default = "default_true")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            max_bytes: default_max_bytes(),
            backup_count: default_backup_count(),
            console: true,
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_interval_seconds() -> u64 {
    5
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("main.log"))
}

fn default_max_bytes() -> usize {
    50_000_000
}

fn default_backup_count() -> usize {
    5
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Fill empty secrets from the process environment
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Fill empty secrets using the given lookup
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            (&mut self.api.token, PRACTICUM_TOKEN_VAR),
            (&mut self.telegram.token, TELEGRAM_TOKEN_VAR),
            (&mut self.telegram.chat_id, TELEGRAM_CHAT_ID_VAR),
        ];
        for (slot, var) in targets {
            if !slot.is_empty() {
                continue;
            }
            if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
                tracing::debug!("Resolved {} from environment", var);
                *slot = value;
            }
        }
    }

    /// Names of required values that are still missing
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        [
            (self.api.token.as_str(), PRACTICUM_TOKEN_VAR),
            (self.telegram.token.as_str(), TELEGRAM_TOKEN_VAR),
            (self.telegram.chat_id.as_str(), TELEGRAM_CHAT_ID_VAR),
        ]
        .into_iter()
        .filter(|(value, _)| value.is_empty())
        .map(|(_, var)| var)
        .collect()
    }

    /// Reject settings the poll loop cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.poll.interval_seconds == 0 {
            return Err(crate::BotError::Config(
                "poll.interval_seconds must be at least 1".to_string(),
            ));
        }
        if self.logging.max_bytes == 0 {
            return Err(crate::BotError::Config(
                "logging.max_bytes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::BotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
