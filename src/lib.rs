//! Tradewatch - relays trade openings of watched Hyperliquid traders to
//! Telegram.
//!
//! An operator manages a watch-list of trader addresses through Telegram bot
//! commands. The crate streams order events from the Hyperliquid WebSocket
//! feed and, whenever a watched human trader opens a position, posts a
//! formatted message to the administrator chat.
//!
//! # Architecture
//!
//! - [`domain`] - Addresses, the watch-list and trade events
//! - [`port`] - Traits at the boundaries (feed, storage, notifier, control)
//! - [`application`] - Watch-list store and trade relay
//! - [`adapter`] - Hyperliquid feed, JSON file storage, Telegram bot, CLI
//! - [`infrastructure`] - Configuration, reconnection and runtime wiring
//!
//! # Features
//!
//! - `testkit` - Test doubles for the ports (scripted feed, in-memory
//!   repository, recording notifier)

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
