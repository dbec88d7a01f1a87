//! Watch-list operations exposed to inbound adapters.

use crate::domain::{AddOutcome, RemoveOutcome, TraderAddress};
use crate::error::Result;

/// Operations the command service performs on the watch-list.
pub trait WatchListControl: Send + Sync {
    /// Track an address; persists on success.
    fn add(&self, address: TraderAddress) -> Result<AddOutcome>;

    /// Stop tracking an address; persists on success.
    fn remove(&self, address: &TraderAddress) -> Result<RemoveOutcome>;

    /// Current addresses in insertion order.
    fn list(&self) -> Vec<TraderAddress>;
}
