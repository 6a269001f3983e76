//! Accounting module (double-entry ledger).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod account;
pub mod balances;
pub mod chart;
pub mod journal;
pub mod validation;

pub use account::{Account, AccountType, NormalBalance, NewAccount, ACCOUNT_TYPES};
pub use balances::{
    line_delta, reconcile, replay_balances, BalanceDrift, TrialBalance, TrialBalanceRow,
};
pub use chart::{DefaultAccount, DEFAULT_CHART};
pub use journal::{
    JournalEntry, JournalEntryInput, JournalLine, JournalLineInput, ValidatedJournal,
    JOURNAL_ID_PREFIX,
};
pub use validation::{
    is_balanced, validate_journal_entry, FieldError, FieldErrors, Violation, BALANCE_TOLERANCE,
};
