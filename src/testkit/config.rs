//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::pool::ReconnectionConfig;
use crate::infrastructure::config::telegram::TelegramAppConfig;

/// Fast reconnection config with millisecond delays.
pub fn reconnection() -> ReconnectionConfig {
    ReconnectionConfig {
        initial_delay_ms: 1,
        max_delay_ms: 1,
        backoff_multiplier: 1.0,
        max_consecutive_failures: 3,
        degraded_cooldown_ms: 10,
    }
}

/// Telegram delivery config with short retry delays.
pub fn telegram() -> TelegramAppConfig {
    TelegramAppConfig {
        send_timeout_secs: 1,
        max_attempts: 3,
        retry_delay_ms: 1,
        queue_capacity: 16,
        restrict_commands_to_admin: false,
    }
}
