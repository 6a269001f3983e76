//! Chart-of-accounts registry: account identity, naming and id derivation.

use tracing::{debug, info};

use bizledger_accounting::{Account, AccountType, DEFAULT_CHART, FieldErrors, NewAccount, Violation};
use bizledger_core::next_sequence_id;

use super::{Ledger, LedgerError};
use crate::store::{LedgerStore, StoreError};

fn derive_account_id(prefix: &str, accounts: &[Account]) -> String {
    next_sequence_id(prefix, accounts.iter().map(|a| a.id.as_str())).to_string()
}

impl<S> Ledger<S>
where
    S: LedgerStore,
{
    /// Suggest the next account id for `prefix` (`AST` → `AST-1006`).
    ///
    /// Nothing is reserved; use [`Ledger::open_account`] to derive and insert
    /// in one step.
    pub fn next_account_id(&self, prefix: &str) -> Result<String, LedgerError> {
        let accounts = self.store.list_accounts()?;
        Ok(derive_account_id(prefix, &accounts))
    }

    /// Create an account with a caller-chosen id and a zero balance.
    ///
    /// Fails with `DuplicateName` when another account has the same name
    /// (case-insensitive) and with `DuplicateId` when the id is taken.
    pub fn create_account(&self, new: NewAccount) -> Result<Account, LedgerError> {
        let _guard = self.lock_writes()?;
        let accounts = self.store.list_accounts()?;
        self.insert_checked(new, &accounts)
    }

    /// Create an account, deriving its id from the type's prefix while the
    /// write lock is held.
    pub fn open_account(
        &self,
        name: &str,
        account_type: AccountType,
        description: Option<String>,
    ) -> Result<Account, LedgerError> {
        let _guard = self.lock_writes()?;
        let accounts = self.store.list_accounts()?;
        let id = derive_account_id(account_type.id_prefix(), &accounts);
        self.insert_checked(NewAccount::new(id, name, account_type, description), &accounts)
    }

    /// Create every default chart account whose name is not taken yet.
    ///
    /// Returns only the accounts created by this call.
    pub fn seed_default_chart(&self) -> Result<Vec<Account>, LedgerError> {
        let _guard = self.lock_writes()?;
        let mut accounts = self.store.list_accounts()?;
        let mut created = Vec::new();

        for default in DEFAULT_CHART {
            if accounts.iter().any(|a| a.has_name(default.name)) {
                debug!(name = default.name, "default account already present");
                continue;
            }
            let id = derive_account_id(default.account_type.id_prefix(), &accounts);
            let account = self.insert_checked(
                NewAccount::new(
                    id,
                    default.name,
                    default.account_type,
                    Some(default.description.to_string()),
                ),
                &accounts,
            )?;
            accounts.push(account.clone());
            created.push(account);
        }

        info!(created = created.len(), "default chart of accounts seeded");
        Ok(created)
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.store.list_accounts()?)
    }

    pub fn get_account(&self, id: &str) -> Result<Account, LedgerError> {
        self.store
            .get_account(id)?
            .ok_or_else(|| LedgerError::NotFound(format!("account {id}")))
    }

    /// Must be called with the write lock held.
    fn insert_checked(&self, new: NewAccount, existing: &[Account]) -> Result<Account, LedgerError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(FieldErrors::single("name", Violation::EmptyName).into());
        }
        if new.id.trim().is_empty() {
            return Err(FieldErrors::single("id", Violation::MissingAccountId).into());
        }
        if existing.iter().any(|a| a.has_name(name)) {
            return Err(LedgerError::DuplicateName(name.to_string()));
        }
        if existing.iter().any(|a| a.id == new.id) {
            return Err(LedgerError::DuplicateId(new.id));
        }

        let account = Account::open(NewAccount {
            name: name.to_string(),
            description: new.description.filter(|d| !d.trim().is_empty()),
            ..new
        });

        match self.store.insert_account(account.clone()) {
            Ok(()) => {}
            Err(StoreError::Conflict(id)) => return Err(LedgerError::DuplicateId(id)),
            Err(e) => return Err(e.into()),
        }

        info!(
            account_id = %account.id,
            name = %account.name,
            account_type = %account.account_type,
            "account created"
        );
        Ok(account)
    }
}
