//! Notifier port for event notifications.

use crate::domain::TradeOpened;

/// Events that can trigger notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A watched trader opened a trade.
    TradeOpened(TradeOpened),
}

/// Trait for notification handlers.
///
/// `notify` must not block; implementations queue the event and deliver it
/// in the background.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Event);
}
