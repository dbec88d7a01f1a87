//! Application services (use cases).
//!
//! These services coordinate domain logic and ports: the watch-list store
//! owns the tracked traders, and the relay turns feed events into
//! notifications.

pub mod relay;
pub mod watchlist;
