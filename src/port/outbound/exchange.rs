//! Exchange trade-feed port.

use async_trait::async_trait;

use crate::domain::{TradeOpened, TraderAddress};
use crate::error::Error;

/// Events surfaced by a [`TradeFeed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A trader opened a new order.
    TradeOpened(TradeOpened),
    /// The connection was lost.
    Disconnected {
        /// Reason reported by the transport.
        reason: String,
    },
}

/// Real-time order-lifecycle feed from an exchange.
///
/// Implementations handle connection management, per-address subscriptions
/// and message decoding for their exchange protocol.
#[async_trait]
pub trait TradeFeed: Send {
    /// Open the streaming connection.
    async fn connect(&mut self) -> Result<(), Error>;

    /// Subscribe to order events for the given traders.
    async fn subscribe(&mut self, addresses: &[TraderAddress]) -> Result<(), Error>;

    /// Stop receiving order events for the given traders.
    async fn unsubscribe(&mut self, addresses: &[TraderAddress]) -> Result<(), Error>;

    /// Receive the next event.
    ///
    /// Returns `None` when the stream is closed or was never connected.
    async fn next_event(&mut self) -> Option<FeedEvent>;

    /// Close the connection. Closing an unconnected feed is a no-op.
    async fn close(&mut self) -> Result<(), Error>;

    /// Exchange name for logging.
    fn exchange_name(&self) -> &'static str;
}
