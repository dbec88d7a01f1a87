//! Ordered, duplicate-free set of watched traders.

use super::address::TraderAddress;

/// Result of [`WatchList::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyTracked,
}

/// Result of [`WatchList::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Watched trader addresses in insertion order.
///
/// Holds no duplicates. Because [`TraderAddress`] is normalized, duplicate
/// detection is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchList {
    addresses: Vec<TraderAddress>,
}

impl WatchList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list, keeping the first occurrence of each address.
    #[must_use]
    pub fn from_addresses(addresses: impl IntoIterator<Item = TraderAddress>) -> Self {
        let mut list = Self::new();
        for address in addresses {
            list.add(address);
        }
        list
    }

    /// Append an address unless it is already tracked.
    pub fn add(&mut self, address: TraderAddress) -> AddOutcome {
        if self.contains(&address) {
            return AddOutcome::AlreadyTracked;
        }
        self.addresses.push(address);
        AddOutcome::Added
    }

    /// Remove the first matching address.
    pub fn remove(&mut self, address: &TraderAddress) -> RemoveOutcome {
        match self.addresses.iter().position(|a| a == address) {
            Some(index) => {
                self.addresses.remove(index);
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::NotFound,
        }
    }

    #[must_use]
    pub fn contains(&self, address: &TraderAddress) -> bool {
        self.addresses.contains(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraderAddress> {
        self.addresses.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TraderAddress] {
        &self.addresses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
