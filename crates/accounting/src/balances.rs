//! Balance math: signed line deltas, replay of posted entries, reconciliation
//! of stored balances and the trial balance report.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::{Account, AccountType, NormalBalance};
use crate::journal::{JournalEntry, JournalLine};
use crate::validation::is_balanced;

/// Signed change a line makes to an account of type `account_type`.
///
/// Debit-normal accounts grow with debits, credit-normal ones with credits.
pub fn line_delta(account_type: AccountType, line: &JournalLine) -> Decimal {
    match account_type.normal_balance() {
        NormalBalance::Debit => line.debit - line.credit,
        NormalBalance::Credit => line.credit - line.debit,
    }
}

/// Recompute every account balance from the posted journal entries.
///
/// Lines referencing unknown accounts are ignored, matching what posting
/// does with them. Accounts with no lines replay to zero.
pub fn replay_balances(accounts: &[Account], journals: &[JournalEntry]) -> BTreeMap<String, Decimal> {
    let types: BTreeMap<&str, AccountType> = accounts
        .iter()
        .map(|a| (a.id.as_str(), a.account_type))
        .collect();

    let mut balances: BTreeMap<String, Decimal> = accounts
        .iter()
        .map(|a| (a.id.clone(), Decimal::ZERO))
        .collect();

    for line in journals.iter().flat_map(|j| &j.lines) {
        if let Some(account_type) = types.get(line.account_id.as_str()) {
            let balance = balances.entry(line.account_id.clone()).or_default();
            *balance = balance.saturating_add(line_delta(*account_type, line));
        }
    }

    balances
}

/// An account whose stored balance disagrees with its replayed balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDrift {
    pub account_id: String,
    pub stored: Decimal,
    pub replayed: Decimal,
}

impl BalanceDrift {
    pub fn difference(&self) -> Decimal {
        self.stored.saturating_sub(self.replayed)
    }
}

/// Accounts whose stored balance does not equal the reduction of their lines.
pub fn reconcile(accounts: &[Account], journals: &[JournalEntry]) -> Vec<BalanceDrift> {
    let replayed = replay_balances(accounts, journals);

    accounts
        .iter()
        .filter_map(|a| {
            let expected = replayed.get(&a.id).copied().unwrap_or_default();
            (expected != a.balance).then(|| BalanceDrift {
                account_id: a.id.clone(),
                stored: a.balance,
                replayed: expected,
            })
        })
        .collect()
}

/// One account's row in the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    pub account_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Debit/credit columns of every account balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

impl TrialBalance {
    /// Build the report from current balances, ordered by account id.
    ///
    /// A balance sits in its normal column when positive and in the opposite
    /// column (as a positive amount) when negative.
    pub fn from_accounts(accounts: &[Account]) -> Self {
        let mut rows: Vec<TrialBalanceRow> = accounts
            .iter()
            .map(|a| {
                let (debit, credit) = match (a.normal_balance(), a.balance.is_sign_negative()) {
                    (NormalBalance::Debit, false) => (a.balance, Decimal::ZERO),
                    (NormalBalance::Debit, true) => (Decimal::ZERO, -a.balance),
                    (NormalBalance::Credit, false) => (Decimal::ZERO, a.balance),
                    (NormalBalance::Credit, true) => (-a.balance, Decimal::ZERO),
                };
                TrialBalanceRow {
                    account_id: a.id.clone(),
                    name: a.name.clone(),
                    account_type: a.account_type,
                    debit,
                    credit,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.account_id.cmp(&b.account_id));

        // Saturates rather than panics when balances sit near Decimal::MAX.
        let total_debit = rows.iter().fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.debit));
        let total_credit = rows.iter().fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.credit));

        Self {
            rows,
            total_debit,
            total_credit,
        }
    }

    pub fn is_balanced(&self) -> bool {
        is_balanced(self.total_debit, self.total_credit)
    }
}
