//! In-memory [`WatchListRepository`] with failure injection.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::TraderAddress;
use crate::error::{Error, Result};
use crate::port::WatchListRepository;

#[derive(Default)]
pub struct MemoryRepository {
    addresses: Mutex<Vec<TraderAddress>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_addresses(addresses: Vec<TraderAddress>) -> Self {
        Self {
            addresses: Mutex::new(addresses),
            ..Self::default()
        }
    }

    pub fn failing_loads(self) -> Self {
        self.fail_loads.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_saves(self) -> Self {
        self.fail_saves.store(true, Ordering::SeqCst);
        self
    }

    /// Last persisted addresses.
    pub fn saved(&self) -> Vec<TraderAddress> {
        self.addresses.lock().expect("lock addresses").clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl WatchListRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<TraderAddress>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(Error::Storage("injected load failure".into()));
        }
        Ok(self.saved())
    }

    fn save(&self, addresses: &[TraderAddress]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::Storage("injected save failure".into()));
        }
        *self.addresses.lock().expect("lock addresses") = addresses.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
