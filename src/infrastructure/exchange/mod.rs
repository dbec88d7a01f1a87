//! Exchange connection management.

pub mod reconnecting;

pub use reconnecting::{FeedState, ReconnectingFeed};
