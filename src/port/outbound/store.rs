//! Persistence port for the watch-list.

use crate::domain::TraderAddress;
use crate::error::Result;

/// Durable storage for watched addresses.
///
/// `save` replaces the whole persisted list.
pub trait WatchListRepository: Send + Sync {
    /// Read the persisted addresses.
    fn load(&self) -> Result<Vec<TraderAddress>>;

    /// Overwrite the persisted addresses.
    fn save(&self, addresses: &[TraderAddress]) -> Result<()>;
}
