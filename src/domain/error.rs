//! Domain validation errors for core domain types.
//!
//! These errors are returned by constructors that validate inputs, such as
//! [`TraderAddress::parse`](crate::domain::address::TraderAddress::parse).
//!
//! # Examples
//!
//! ```
//! use tradewatch::domain::address::TraderAddress;
//! use tradewatch::domain::error::DomainError;
//!
//! let result = TraderAddress::parse("   ");
//! assert!(matches!(result, Err(DomainError::EmptyAddress)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Trader addresses must contain at least one non-whitespace character.
    #[error("address cannot be empty")]
    EmptyAddress,

    /// Trader addresses are single tokens.
    #[error("address `{address}` must not contain whitespace")]
    InvalidAddress {
        /// The rejected input.
        address: String,
    },
}
