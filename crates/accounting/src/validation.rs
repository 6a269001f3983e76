//! Structural and balance validation of submitted journal entries.
//!
//! Validation is pure and reports every violated rule in one pass, each
//! scoped to the field that caused it.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::journal::{JournalEntryInput, JournalLine, JournalLineInput, ValidatedJournal};

/// Maximum |Σdebit − Σcredit| for an entry to count as balanced (exclusive).
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Minimum number of lines in a journal entry.
pub const MIN_LINES: usize = 2;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Violation {
    #[error("account is required")]
    MissingAccountId,

    #[error("amount must not be negative (got {amount})")]
    NegativeAmount { amount: Decimal },

    #[error("a line cannot have both a debit and a credit")]
    BothSidesPresent,

    #[error("a line must have either a debit or a credit")]
    NoSidePresent,

    #[error("at least {} lines are required (got {found})", MIN_LINES)]
    TooFewLines { found: usize },

    #[error("invalid date {value:?}")]
    InvalidDate { value: String },

    #[error("notes are required")]
    EmptyNotes,

    #[error("name is required")]
    EmptyName,

    #[error("debits ({debits}) must equal credits ({credits})")]
    Unbalanced { debits: Decimal, credits: Decimal },

    #[error("amounts exceed the supported range")]
    AmountOutOfRange,
}

/// A violated rule together with the field it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {violation}")]
pub struct FieldError {
    pub field: String,
    #[serde(flatten)]
    pub violation: Violation,
}

impl FieldError {
    pub fn new(field: impl Into<String>, violation: Violation) -> Self {
        Self {
            field: field.into(),
            violation,
        }
    }
}

/// Every rule a submitted entry violated (never empty when returned as an error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn single(field: impl Into<String>, violation: Violation) -> Self {
        Self(vec![FieldError::new(field, violation)])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Errors reported against `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.0.iter().filter(move |e| e.field == field).map(|e| &e.violation)
    }

    /// Whether the debit/credit totals failed to match.
    pub fn is_unbalanced(&self) -> bool {
        self.0
            .iter()
            .any(|e| matches!(e.violation, Violation::Unbalanced { .. }))
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            core::fmt::Display::fmt(err, f)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Whether the two totals match within [`BALANCE_TOLERANCE`].
pub fn is_balanced(debits: Decimal, credits: Decimal) -> bool {
    debits
        .checked_sub(credits)
        .is_some_and(|diff| diff.abs() < BALANCE_TOLERANCE)
}

/// Sum of the present amounts, or `None` once the total leaves `Decimal`'s range.
fn checked_total(amounts: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    amounts.flatten().try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn check_line(idx: usize, line: &JournalLineInput, errors: &mut Vec<FieldError>) {
    if line.account_id.trim().is_empty() {
        errors.push(FieldError::new(
            format!("lines[{idx}].account_id"),
            Violation::MissingAccountId,
        ));
    }

    for (side, amount) in [("debit", line.debit), ("credit", line.credit)] {
        if let Some(amount) = amount.filter(|a| a.is_sign_negative() && !a.is_zero()) {
            errors.push(FieldError::new(
                format!("lines[{idx}].{side}"),
                Violation::NegativeAmount { amount },
            ));
        }
    }

    let positive = |v: Option<Decimal>| v.is_some_and(|a| a > Decimal::ZERO);
    match (positive(line.debit), positive(line.credit)) {
        (true, true) => errors.push(FieldError::new(format!("lines[{idx}]"), Violation::BothSidesPresent)),
        (false, false) => errors.push(FieldError::new(format!("lines[{idx}]"), Violation::NoSidePresent)),
        _ => {}
    }
}

/// Validate a submitted entry.
///
/// Checks, in order: every line (account present, no negative amounts,
/// exactly one positive side), the line count, the date, the notes and
/// finally that debits equal credits. All failures are returned together.
pub fn validate_journal_entry(input: &JournalEntryInput) -> Result<ValidatedJournal, FieldErrors> {
    let mut errors = Vec::new();

    for (idx, line) in input.lines.iter().enumerate() {
        check_line(idx, line, &mut errors);
    }

    if input.lines.len() < MIN_LINES {
        errors.push(FieldError::new(
            "lines",
            Violation::TooFewLines {
                found: input.lines.len(),
            },
        ));
    }

    let date = parse_date(&input.date);
    if date.is_none() {
        errors.push(FieldError::new(
            "date",
            Violation::InvalidDate {
                value: input.date.clone(),
            },
        ));
    }

    if input.notes.trim().is_empty() {
        errors.push(FieldError::new("notes", Violation::EmptyNotes));
    }

    let debits = checked_total(input.lines.iter().map(|l| l.debit));
    let credits = checked_total(input.lines.iter().map(|l| l.credit));
    match (debits, credits) {
        (Some(debits), Some(credits)) => {
            if !is_balanced(debits, credits) {
                errors.push(FieldError::new("lines", Violation::Unbalanced { debits, credits }));
            }
        }
        _ => errors.push(FieldError::new("lines", Violation::AmountOutOfRange)),
    }

    match date {
        Some(date) if errors.is_empty() => Ok(ValidatedJournal {
            date,
            notes: input.notes.trim().to_string(),
            lines: input
                .lines
                .iter()
                .map(|l| JournalLine {
                    account_id: l.account_id.trim().to_string(),
                    debit: l.debit.unwrap_or(Decimal::ZERO),
                    credit: l.credit.unwrap_or(Decimal::ZERO),
                })
                .collect(),
        }),
        _ => Err(FieldErrors(errors)),
    }
}
