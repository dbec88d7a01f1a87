//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Exchange │            │   Store     │              │ Notifier  │
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`TradeFeed`] - Exchange order-event stream
//! - [`WatchListRepository`] - Watch-list persistence
//! - [`Notifier`] - Event notifications
//! - [`WatchListControl`] - Watch-list operations for command handlers

pub mod inbound;
pub mod outbound;

pub use inbound::watchlist::WatchListControl;
pub use outbound::exchange::{FeedEvent, TradeFeed};
pub use outbound::notifier::{Event, Notifier};
pub use outbound::store::WatchListRepository;
