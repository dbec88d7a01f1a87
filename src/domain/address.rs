//! Trader address identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Exchange account identifier being watched.
///
/// Addresses are trimmed and lower-cased on construction, so equality is
/// case-insensitive: `0xABC` and `0xabc` are the same trader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TraderAddress(String);

impl TraderAddress {
    /// Parse and normalize an address.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyAddress`] for blank input and
    /// [`DomainError::InvalidAddress`] when the input contains whitespace.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyAddress);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidAddress {
                address: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Normalized (lower-case) form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TraderAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TraderAddress> for String {
    fn from(address: TraderAddress) -> Self {
        address.0
    }
}

impl AsRef<str> for TraderAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
