//! Trade-open events decoded from the exchange feed.

use std::fmt;

use super::address::TraderAddress;

/// Role of the account that submitted an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraderRole {
    /// A human account (`"user"` on the wire).
    User,
    /// Any other submitter, e.g. bots or system accounts.
    Other(String),
    /// The payload carried no role.
    Unknown,
}

impl TraderRole {
    /// Wire marker for human accounts.
    pub const USER: &'static str = "user";

    #[must_use]
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            Some(Self::USER) => Self::User,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Unknown,
        }
    }

    /// The wire marker, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::User => Some(Self::USER),
            Self::Other(role) => Some(role),
            Self::Unknown => None,
        }
    }
}

/// Payload field passed through to notifications without interpretation.
///
/// Absent and null fields render as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValue(Option<String>);

impl FieldValue {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    #[must_use]
    pub const fn missing() -> Self {
        Self(None)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_deref().unwrap_or("null"))
    }
}

/// An "order created" event for one trader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOpened {
    pub trader: TraderAddress,
    pub role: TraderRole,
    pub symbol: FieldValue,
    pub entry_price: FieldValue,
    pub stop_loss: FieldValue,
    pub take_profit: FieldValue,
}
