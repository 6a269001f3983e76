//! Ledger service: the chart-of-accounts registry and the journal posting
//! engine on top of a [`LedgerStore`].
//!
//! ## Write serialization
//!
//! Every write path (account creation, journal posting) runs under a single
//! write lock. Identifier reservation and the read-modify-write of balances
//! therefore never interleave, so two postings touching the same account
//! cannot lose each other's update. Reads take no lock.
//!
//! ## Partial application
//!
//! Posting is not atomic across records. Once a journal entry is appended it
//! stays, even if a later balance write fails (`LedgerError::PartiallyPosted`)
//! or a line names an account that does not exist (reported as an
//! [`OrphanLine`]). [`Ledger::reconcile`] detects any resulting drift.
//! An entry that would overflow a balance is rejected before it is appended.

use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use bizledger_accounting::{FieldErrors, JournalEntry};

use crate::store::{LedgerStore, StoreError};

mod posting;
mod registry;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed, missing or contradictory input (includes unbalanced entries).
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("an account named {0:?} already exists")]
    DuplicateName(String),

    #[error("account id {0:?} is already in use")]
    DuplicateId(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("persistence failure: {0}")]
    Store(#[from] StoreError),

    /// The journal entry was persisted but not every balance was updated.
    #[error(
        "journal entry {entry_id} persisted but balance propagation stopped after {applied} update(s): {source}"
    )]
    PartiallyPosted {
        entry_id: String,
        applied: usize,
        #[source]
        source: StoreError,
    },
}

impl From<FieldErrors> for LedgerError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

/// Balance update applied to one account by one journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub account_id: String,
    pub previous: Decimal,
    pub delta: Decimal,
    pub balance: Decimal,
}

/// Journal line whose account did not exist when the entry was posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanLine {
    pub line_index: usize,
    pub account_id: String,
}

/// Outcome of a successful posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingReceipt {
    pub entry: JournalEntry,
    pub balance_changes: Vec<BalanceChange>,
    pub orphan_lines: Vec<OrphanLine>,
}

/// Double-entry ledger backed by a persistence collaborator.
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S> Ledger<S>
where
    S: LedgerStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>, LedgerError> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("ledger write lock poisoned".to_string()).into())
    }
}
