//! Telegram notification and command handling.
//!
//! Provides Telegram bot integration for trade notifications and the bot
//! commands that manage the watch-list.

mod auth;
mod command;
mod control;
mod format;

pub mod notifier;

pub use auth::CommandAuth;
pub use control::TelegramControl;
pub use notifier::{run_command_listener, DeliveryPolicy, MessageTransport, TelegramNotifier};
