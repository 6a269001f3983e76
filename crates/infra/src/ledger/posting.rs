//! Journal posting engine: id reservation, persistence and balance propagation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use bizledger_accounting::{
    Account, AccountType, BalanceDrift, FieldErrors, JOURNAL_ID_PREFIX, JournalEntry, JournalEntryInput,
    TrialBalance, ValidatedJournal, Violation, line_delta, reconcile, validate_journal_entry,
};
use bizledger_core::next_sequence_id;

use super::{BalanceChange, Ledger, LedgerError, OrphanLine, PostingReceipt};
use crate::store::LedgerStore;

fn derive_journal_id(journals: &[JournalEntry]) -> String {
    next_sequence_id(JOURNAL_ID_PREFIX, journals.iter().map(|j| j.id.as_str())).to_string()
}

/// Balance change per known line, in line order, plus the lines naming no account.
fn plan_balance_changes(
    entry: &JournalEntry,
    accounts: &[Account],
) -> Result<(Vec<BalanceChange>, Vec<OrphanLine>), LedgerError> {
    let mut working: HashMap<&str, (AccountType, Decimal)> = accounts
        .iter()
        .map(|a| (a.id.as_str(), (a.account_type, a.balance)))
        .collect();

    let mut balance_changes = Vec::with_capacity(entry.lines.len());
    let mut orphan_lines = Vec::new();

    for (line_index, line) in entry.lines.iter().enumerate() {
        let Some((account_type, balance)) = working.get_mut(line.account_id.as_str()) else {
            orphan_lines.push(OrphanLine {
                line_index,
                account_id: line.account_id.clone(),
            });
            continue;
        };

        let previous = *balance;
        let delta = line_delta(*account_type, line);
        let Some(updated) = previous.checked_add(delta) else {
            warn!(
                account_id = %line.account_id,
                line_index,
                %previous,
                %delta,
                "journal entry would overflow account balance; rejected"
            );
            return Err(FieldErrors::single(format!("lines[{line_index}]"), Violation::AmountOutOfRange).into());
        };

        *balance = updated;
        balance_changes.push(BalanceChange {
            account_id: line.account_id.clone(),
            previous,
            delta,
            balance: updated,
        });
    }

    Ok((balance_changes, orphan_lines))
}

impl<S> Ledger<S>
where
    S: LedgerStore,
{
    /// Suggest the next journal id (`JRN-1001` when none exist).
    pub fn next_journal_id(&self) -> Result<String, LedgerError> {
        let journals = self.store.list_journals()?;
        Ok(derive_journal_id(&journals))
    }

    /// Validate and post in one step. Invalid input never reaches the store.
    pub fn submit_journal_entry(&self, input: &JournalEntryInput) -> Result<PostingReceipt, LedgerError> {
        let validated = validate_journal_entry(input)?;
        self.post_journal_entry(validated)
    }

    /// Persist a validated entry and apply its balance deltas.
    ///
    /// Every line's new balance is computed against a snapshot of the
    /// accounts before anything is written, so an entry that would push a
    /// balance out of `Decimal`'s range is rejected with
    /// [`Violation::AmountOutOfRange`] and never stored. The entry is then
    /// appended under a freshly reserved `JRN-` id and each new balance is
    /// written back one line at a time. Lines on the same account compose
    /// in line order.
    pub fn post_journal_entry(&self, journal: ValidatedJournal) -> Result<PostingReceipt, LedgerError> {
        let _guard = self.lock_writes()?;

        let journals = self.store.list_journals()?;
        let entry = journal.into_entry(derive_journal_id(&journals));
        let accounts = self.store.list_accounts()?;

        let (balance_changes, orphan_lines) = plan_balance_changes(&entry, &accounts)?;

        if let Err(e) = self.store.append_journal(entry.clone()) {
            error!(entry_id = %entry.id, error = %e, "failed to persist journal entry");
            return Err(e.into());
        }

        for orphan in &orphan_lines {
            warn!(
                entry_id = %entry.id,
                line_index = orphan.line_index,
                account_id = %orphan.account_id,
                "journal line references unknown account; balance not updated"
            );
        }

        for (applied, change) in balance_changes.iter().enumerate() {
            if let Err(source) = self.store.set_account_balance(&change.account_id, change.balance) {
                error!(
                    entry_id = %entry.id,
                    account_id = %change.account_id,
                    applied,
                    error = %source,
                    "balance update failed; journal entry stays posted"
                );
                return Err(LedgerError::PartiallyPosted {
                    entry_id: entry.id.clone(),
                    applied,
                    source,
                });
            }
        }

        info!(
            entry_id = %entry.id,
            date = %entry.date,
            lines = entry.lines.len(),
            total = %entry.total_debit(),
            orphans = orphan_lines.len(),
            "journal entry posted"
        );

        Ok(PostingReceipt {
            entry,
            balance_changes,
            orphan_lines,
        })
    }

    pub fn list_journals(&self) -> Result<Vec<JournalEntry>, LedgerError> {
        Ok(self.store.list_journals()?)
    }

    pub fn get_journal(&self, id: &str) -> Result<JournalEntry, LedgerError> {
        self.store
            .list_journals()?
            .into_iter()
            .find(|j| j.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("journal entry {id}")))
    }

    /// Accounts whose stored balance differs from the replay of all entries.
    pub fn reconcile(&self) -> Result<Vec<BalanceDrift>, LedgerError> {
        let accounts = self.store.list_accounts()?;
        let journals = self.store.list_journals()?;
        let drift = reconcile(&accounts, &journals);
        for d in &drift {
            warn!(
                account_id = %d.account_id,
                stored = %d.stored,
                replayed = %d.replayed,
                "stored balance drifted from journal history"
            );
        }
        Ok(drift)
    }

    pub fn trial_balance(&self) -> Result<TrialBalance, LedgerError> {
        let accounts = self.store.list_accounts()?;
        Ok(TrialBalance::from_accounts(&accounts))
    }
}
