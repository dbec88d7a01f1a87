//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`feed`] - [`ScriptedFeed`](feed::ScriptedFeed), a mock
//!   [`TradeFeed`](crate::port::TradeFeed) with an on-demand event channel.
//! - [`store`] - In-memory watch-list repository with failure injection.
//! - [`notifier`] - Event-recording notifier.
//! - [`domain`] - Builders for addresses and trade events.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod feed;
pub mod notifier;
pub mod store;
