//! Hyperliquid exchange adapter.

pub mod dto;
pub mod stream;

pub use stream::HyperliquidFeed;
