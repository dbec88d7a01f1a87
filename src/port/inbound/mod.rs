//! Inbound ports (driving side): operations invoked by inbound adapters.

pub mod watchlist;
