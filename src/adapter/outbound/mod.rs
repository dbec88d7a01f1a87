//! Outbound adapters (driven side).

pub mod file;
pub mod hyperliquid;
pub mod notifier;
