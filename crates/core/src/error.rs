//! Parse errors for ledger primitives.

use thiserror::Error;

/// A textual value that does not name a valid ledger primitive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was not of the form `<PREFIX>-<n>`.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An account type outside the closed set.
    #[error("unknown account type {0:?} (expected Assets, Liabilities, Equity, Income or Expense)")]
    UnknownAccountType(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
