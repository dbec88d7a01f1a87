//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving adapters (CLI)
//! - [`outbound`] - Driven adapters (exchange feed, storage, Telegram)

pub mod inbound;
pub mod outbound;
