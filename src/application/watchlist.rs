//! Watch-list store: the single owner of the tracked-trader list.
//!
//! All reads and writes go through [`WatchListStore`]. Mutations are
//! serialized by one lock that is held across modify, persist and publish,
//! so concurrent `add`/`remove` calls cannot lose updates. Every committed
//! change is published on a `watch` channel, which the relay uses to keep
//! its live subscriptions in sync.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::{AddOutcome, RemoveOutcome, TraderAddress, WatchList};
use crate::error::Result;
use crate::port::{WatchListControl, WatchListRepository};

/// Mutex-guarded watch-list backed by a [`WatchListRepository`].
pub struct WatchListStore {
    list: Mutex<WatchList>,
    repository: Arc<dyn WatchListRepository>,
    changes: watch::Sender<Vec<TraderAddress>>,
}

impl WatchListStore {
    /// Load the persisted list, starting empty if it cannot be read.
    #[must_use]
    pub fn open(repository: Arc<dyn WatchListRepository>) -> Self {
        let list = match repository.load() {
            Ok(addresses) => WatchList::from_addresses(addresses),
            Err(e) => {
                warn!(error = %e, "Failed to load watch-list, starting empty");
                WatchList::new()
            }
        };
        info!(traders = list.len(), "Watch-list loaded");

        let (changes, _) = watch::channel(list.as_slice().to_vec());
        Self {
            list: Mutex::new(list),
            repository,
            changes,
        }
    }

    /// Receiver that observes every committed change.
    ///
    /// The initial value is the list at the time of the call.
    #[must_use]
    pub fn subscribe_changes(&self) -> watch::Receiver<Vec<TraderAddress>> {
        self.changes.subscribe()
    }

    /// Run `mutate` on a copy, persist it and only then commit.
    fn commit<T>(&self, mutate: impl FnOnce(&mut WatchList) -> (T, bool)) -> Result<T> {
        let mut guard = self.list.lock();
        let mut next = guard.clone();
        let (outcome, changed) = mutate(&mut next);
        if !changed {
            return Ok(outcome);
        }

        self.repository.save(next.as_slice())?;
        *guard = next;
        self.changes.send_replace(guard.as_slice().to_vec());
        Ok(outcome)
    }
}

impl WatchListControl for WatchListStore {
    fn add(&self, address: TraderAddress) -> Result<AddOutcome> {
        let trader = address.clone();
        let outcome = self.commit(|list| {
            let outcome = list.add(address);
            (outcome, outcome == AddOutcome::Added)
        })?;
        if outcome == AddOutcome::Added {
            info!(trader = %trader, "Trader added");
        }
        Ok(outcome)
    }

    fn remove(&self, address: &TraderAddress) -> Result<RemoveOutcome> {
        let outcome = self.commit(|list| {
            let outcome = list.remove(address);
            (outcome, outcome == RemoveOutcome::Removed)
        })?;
        if outcome == RemoveOutcome::Removed {
            info!(trader = %address, "Trader removed");
        }
        Ok(outcome)
    }

    fn list(&self) -> Vec<TraderAddress> {
        self.list.lock().as_slice().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::store::MemoryRepository;

    fn addr(raw: &str) -> TraderAddress {
        TraderAddress::parse(raw).unwrap()
    }

    #[test]
    fn open_uses_persisted_addresses() {
        let repo = Arc::new(MemoryRepository::with_addresses(vec![
            addr("0xa"),
            addr("0xb"),
        ]));
        let store = WatchListStore::open(repo);
        assert_eq!(store.list(), vec![addr("0xa"), addr("0xb")]);
    }

    #[test]
    fn open_starts_empty_when_load_fails() {
        let repo = Arc::new(MemoryRepository::new().failing_loads());
        let store = WatchListStore::open(repo);
        assert!(store.list().is_empty());
    }

    #[test]
    fn add_persists_and_publishes() {
        let repo = Arc::new(MemoryRepository::new());
        let store = WatchListStore::open(repo.clone());
        let changes = store.subscribe_changes();

        assert_eq!(store.add(addr("0xABC")).unwrap(), AddOutcome::Added);

        assert_eq!(repo.saved(), vec![addr("0xabc")]);
        assert_eq!(*changes.borrow(), vec![addr("0xabc")]);
    }

    #[test]
    fn duplicate_add_does_not_persist() {
        let repo = Arc::new(MemoryRepository::new());
        let store = WatchListStore::open(repo.clone());

        store.add(addr("0xabc")).unwrap();
        assert_eq!(
            store.add(addr("0xABC")).unwrap(),
            AddOutcome::AlreadyTracked
        );
        assert_eq!(repo.save_count(), 1);
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn remove_missing_reports_not_found() {
        let repo = Arc::new(MemoryRepository::with_addresses(vec![addr("0xa")]));
        let store = WatchListStore::open(repo.clone());

        assert_eq!(store.remove(&addr("0xb")).unwrap(), RemoveOutcome::NotFound);
        assert_eq!(store.list(), vec![addr("0xa")]);
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn failed_save_rolls_back() {
        let repo = Arc::new(MemoryRepository::new().failing_saves());
        let store = WatchListStore::open(repo);
        let changes = store.subscribe_changes();

        let result = store.add(addr("0xa"));

        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(store.list().is_empty());
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn concurrent_mutations_are_not_lost() {
        let repo = Arc::new(MemoryRepository::new());
        let store = Arc::new(WatchListStore::open(repo.clone()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..25 {
                        store.add(addr(&format!("0x{i}_{j}"))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.list().len(), 200);
        assert_eq!(repo.saved().len(), 200);
    }
}
