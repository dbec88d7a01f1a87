//! Builders for domain primitives.

use crate::domain::{FieldValue, TradeOpened, TraderAddress, TraderRole};

/// Parse an address, panicking on invalid input.
pub fn address(raw: &str) -> TraderAddress {
    TraderAddress::parse(raw).expect("valid test address")
}

/// A BTC trade at 100 / 90 / 120 for `trader` submitted with `role`.
pub fn trade(trader: &str, role: &str) -> TradeOpened {
    TradeOpened {
        trader: address(trader),
        role: TraderRole::from_wire(Some(role)),
        symbol: FieldValue::new("BTC"),
        entry_price: FieldValue::new("100"),
        stop_loss: FieldValue::new("90"),
        take_profit: FieldValue::new("120"),
    }
}
