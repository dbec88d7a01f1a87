//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from an optional TOML file; every
//! section has defaults. Bot credentials are never read from the file, see
//! [`TelegramSecrets`](super::telegram::TelegramSecrets).
//!
//! # Example
//!
//! ```no_run
//! use tradewatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::feed::FeedConfig;
use super::logging::LoggingConfig;
use super::pool::ReconnectionConfig;
use super::storage::StorageConfig;
use super::telegram::TelegramAppConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Exchange feed endpoint and relay policy.
    #[serde(default)]
    pub feed: FeedConfig,

    /// WebSocket reconnection settings.
    ///
    /// Controls backoff delays and the degraded-state cooldown.
    #[serde(default)]
    pub reconnection: ReconnectionConfig,

    /// Watch-list file location.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Telegram delivery and command settings.
    #[serde(default)]
    pub telegram: TelegramAppConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load a file if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is unreadable or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        let ws_url = self.feed.ws_url.trim();
        if ws_url.is_empty() {
            return Err(ConfigError::MissingField { field: "ws_url" }.into());
        }
        let parsed = Url::parse(ws_url).map_err(|e| ConfigError::InvalidValue {
            field: "ws_url",
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "ws" | "wss") {
            return Err(ConfigError::InvalidValue {
                field: "ws_url",
                reason: format!("scheme must be ws or wss, got {}", parsed.scheme()),
            }
            .into());
        }
        Url::parse(&self.feed.profile_url).map_err(|e| ConfigError::InvalidValue {
            field: "profile_url",
            reason: e.to_string(),
        })?;
        if self.feed.notify_roles.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "notify_roles",
                reason: "at least one role is required".to_string(),
            }
            .into());
        }

        if self.reconnection.initial_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_delay_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.reconnection.max_delay_ms < self.reconnection.initial_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_delay_ms",
                reason: "must be >= initial_delay_ms".to_string(),
            }
            .into());
        }
        if self.reconnection.backoff_multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff_multiplier",
                reason: "must be >= 1.0".to_string(),
            }
            .into());
        }
        if self.reconnection.max_consecutive_failures == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_consecutive_failures",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.reconnection.degraded_cooldown_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "degraded_cooldown_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.telegram.send_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "send_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.telegram.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.telegram.queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "queue_capacity",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "storage.path" }.into());
        }

        Ok(())
    }
}
