use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bizledger_core::Entity;

/// Identifier prefix for journal entries (`JRN-1001`, `JRN-1002`, ...).
pub const JOURNAL_ID_PREFIX: &str = "JRN";

/// One line of a posted journal entry (immutable).
///
/// Exactly one of `debit` / `credit` is positive; the other is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLine {
    pub account_id: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl JournalLine {
    pub fn debit(account_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    pub fn credit(account_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// A posted journal entry (immutable once created).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub notes: String,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.debit))
    }

    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.credit))
    }
}

impl Entity for JournalEntry {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A journal entry that passed validation but has no identifier yet.
///
/// Only [`crate::validate_journal_entry`] builds these, so holding one means
/// every structural and balance rule was satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedJournal {
    pub(crate) date: NaiveDate,
    pub(crate) notes: String,
    pub(crate) lines: Vec<JournalLine>,
}

impl ValidatedJournal {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn lines(&self) -> &[JournalLine] {
        &self.lines
    }

    /// Attach the identifier reserved for this entry.
    pub fn into_entry(self, id: impl Into<String>) -> JournalEntry {
        JournalEntry {
            id: id.into(),
            date: self.date,
            notes: self.notes,
            lines: self.lines,
        }
    }
}

/// Raw journal entry as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryInput {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub lines: Vec<JournalLineInput>,
}

/// Raw journal line as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLineInput {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub debit: Option<Decimal>,
    #[serde(default)]
    pub credit: Option<Decimal>,
}

impl JournalLineInput {
    pub fn debit(account_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit: Some(amount),
            credit: None,
        }
    }

    pub fn credit(account_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit: None,
            credit: Some(amount),
        }
    }
}
