//! Exchange-agnostic domain types.

pub mod address;
pub mod error;
pub mod trade;
pub mod watchlist;

pub use address::TraderAddress;
pub use trade::{FieldValue, TradeOpened, TraderRole};
pub use watchlist::{AddOutcome, RemoveOutcome, WatchList};
