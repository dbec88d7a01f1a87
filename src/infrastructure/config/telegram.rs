//! Telegram bot configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Telegram delivery and command settings.
///
/// The bot token and administrator chat are secrets and never read from
/// the config file; see [`TelegramSecrets`].
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Upper bound on a single Telegram API call (seconds).
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
    /// Delivery attempts per notification, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry (milliseconds).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Pending notifications held before new ones are dropped.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Only accept commands from the administrator chat.
    #[serde(default)]
    pub restrict_commands_to_admin: bool,
}

const fn default_send_timeout_secs() -> u64 {
    10
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_retry_delay_ms() -> u64 {
    500
}

const fn default_queue_capacity() -> usize {
    256
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            send_timeout_secs: default_send_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            queue_capacity: default_queue_capacity(),
            restrict_commands_to_admin: false,
        }
    }
}

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the administrator chat id.
pub const ADMIN_CHAT_ENV: &str = "ADMIN_CHAT_ID";

/// Bot credentials loaded from the environment.
#[derive(Clone)]
pub struct TelegramSecrets {
    pub bot_token: String,
    pub admin_chat_id: i64,
}

impl std::fmt::Debug for TelegramSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSecrets")
            .field("bot_token", &"<redacted>")
            .field("admin_chat_id", &self.admin_chat_id)
            .finish()
    }
}

impl TelegramSecrets {
    /// Read the bot token and administrator chat id from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either variable is missing, blank or
    /// (for the chat id) not an integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup(TOKEN_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingField { field: TOKEN_ENV })?;

        let raw_chat = lookup(ADMIN_CHAT_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingField {
                field: ADMIN_CHAT_ENV,
            })?;
        let admin_chat_id = raw_chat
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidValue {
                field: ADMIN_CHAT_ENV,
                reason: format!("`{raw_chat}` is not an integer chat id: {e}"),
            })?;

        Ok(Self {
            bot_token,
            admin_chat_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn secrets_missing_token() {
        let result = TelegramSecrets::from_lookup(lookup(&[(ADMIN_CHAT_ENV, "42")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: TOKEN_ENV })
        ));
    }

    #[test]
    fn secrets_blank_token_is_missing() {
        let result =
            TelegramSecrets::from_lookup(lookup(&[(TOKEN_ENV, "  "), (ADMIN_CHAT_ENV, "42")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { field: TOKEN_ENV })
        ));
    }

    #[test]
    fn secrets_missing_chat_id() {
        let result = TelegramSecrets::from_lookup(lookup(&[(TOKEN_ENV, "abc")]));
        assert!(matches!(
            result,
            Err(ConfigError::MissingField {
                field: ADMIN_CHAT_ENV
            })
        ));
    }

    #[test]
    fn secrets_invalid_chat_id() {
        let result = TelegramSecrets::from_lookup(lookup(&[
            (TOKEN_ENV, "abc"),
            (ADMIN_CHAT_ENV, "not-a-number"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: ADMIN_CHAT_ENV,
                ..
            })
        ));
    }

    #[test]
    fn secrets_valid() {
        let secrets = TelegramSecrets::from_lookup(lookup(&[
            (TOKEN_ENV, "123:abc"),
            (ADMIN_CHAT_ENV, "-100200300"),
        ]))
        .unwrap();
        assert_eq!(secrets.bot_token, "123:abc");
        assert_eq!(secrets.admin_chat_id, -100200300);
    }

    #[test]
    fn secrets_debug_redacts_token() {
        let secrets = TelegramSecrets {
            bot_token: "123:secret".into(),
            admin_chat_id: 1,
        };
        assert!(!format!("{secrets:?}").contains("secret"));
    }
}
