//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the exchange feed,
//! watch-list storage and notifications.

pub mod exchange;
pub mod notifier;
pub mod store;
