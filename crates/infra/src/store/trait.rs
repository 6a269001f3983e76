use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use bizledger_accounting::{Account, JournalEntry};

/// Storage operation error.
///
/// These are **infrastructure errors** as opposed to domain errors
/// (validation, duplicate names).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record already exists: {0}")]
    Conflict(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence collaborator for accounts and journal entries.
///
/// Each call is atomic for the single record it touches. Callers that need
/// several writes to happen together must serialize them themselves.
pub trait LedgerStore: Send + Sync {
    /// All accounts, in creation order.
    fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;

    fn get_account(&self, id: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new account. Fails with `Conflict` if the id is taken.
    fn insert_account(&self, account: Account) -> Result<(), StoreError>;

    /// Overwrite the balance of an existing account.
    fn set_account_balance(&self, id: &str, balance: Decimal) -> Result<(), StoreError>;

    /// All journal entries, in posting order.
    fn list_journals(&self) -> Result<Vec<JournalEntry>, StoreError>;

    /// Append an immutable journal entry. Fails with `Conflict` if the id is taken.
    fn append_journal(&self, entry: JournalEntry) -> Result<(), StoreError>;
}

impl<S> LedgerStore for Arc<S>
where
    S: LedgerStore + ?Sized,
{
    fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        (**self).list_accounts()
    }

    fn get_account(&self, id: &str) -> Result<Option<Account>, StoreError> {
        (**self).get_account(id)
    }

    fn insert_account(&self, account: Account) -> Result<(), StoreError> {
        (**self).insert_account(account)
    }

    fn set_account_balance(&self, id: &str, balance: Decimal) -> Result<(), StoreError> {
        (**self).set_account_balance(id, balance)
    }

    fn list_journals(&self) -> Result<Vec<JournalEntry>, StoreError> {
        (**self).list_journals()
    }

    fn append_journal(&self, entry: JournalEntry) -> Result<(), StoreError> {
        (**self).append_journal(entry)
    }
}
