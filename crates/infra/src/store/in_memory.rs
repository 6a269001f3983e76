use std::sync::RwLock;

use rust_decimal::Decimal;

use bizledger_accounting::{Account, JournalEntry};
use bizledger_core::Entity;

use super::r#trait::{LedgerStore, StoreError};

/// In-memory ledger store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    accounts: RwLock<Vec<Account>>,
    journals: RwLock<Vec<JournalEntry>>,
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

fn ensure_unique<E: Entity<Id = String>>(existing: &[E], id: &str) -> Result<(), StoreError> {
    if existing.iter().any(|e| e.id() == id) {
        return Err(StoreError::Conflict(id.to_string()));
    }
    Ok(())
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with existing records (no uniqueness checks).
    pub fn with_records(accounts: Vec<Account>, journals: Vec<JournalEntry>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
            journals: RwLock::new(journals),
        }
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.read().map_err(|_| poisoned())?.clone())
    }

    fn get_account(&self, id: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    fn insert_account(&self, account: Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;
        ensure_unique(accounts.as_slice(), &account.id)?;
        accounts.push(account);
        Ok(())
    }

    fn set_account_balance(&self, id: &str, balance: Decimal) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;
        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        account.balance = balance;
        Ok(())
    }

    fn list_journals(&self) -> Result<Vec<JournalEntry>, StoreError> {
        Ok(self.journals.read().map_err(|_| poisoned())?.clone())
    }

    fn append_journal(&self, entry: JournalEntry) -> Result<(), StoreError> {
        let mut journals = self.journals.write().map_err(|_| poisoned())?;
        ensure_unique(journals.as_slice(), &entry.id)?;
        journals.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizledger_accounting::{AccountType, NewAccount};
    use rust_decimal_macros::dec;

    fn cash() -> Account {
        Account::open(NewAccount::new("AST-1001", "Cash", AccountType::Assets, None))
    }

    #[test]
    fn insert_then_get_and_list() {
        let store = InMemoryLedgerStore::new();
        store.insert_account(cash()).unwrap();

        assert_eq!(store.get_account("AST-1001").unwrap(), Some(cash()));
        assert_eq!(store.get_account("AST-9999").unwrap(), None);
        assert_eq!(store.list_accounts().unwrap(), vec![cash()]);
    }

    #[test]
    fn duplicate_ids_conflict() {
        let store = InMemoryLedgerStore::new();
        store.insert_account(cash()).unwrap();

        let err = store.insert_account(cash()).unwrap_err();
        assert_eq!(err, StoreError::Conflict("AST-1001".to_string()));
        assert_eq!(store.list_accounts().unwrap().len(), 1);
    }

    #[test]
    fn set_balance_updates_existing_account_only() {
        let store = InMemoryLedgerStore::new();
        store.insert_account(cash()).unwrap();

        store.set_account_balance("AST-1001", dec!(42.50)).unwrap();
        assert_eq!(store.get_account("AST-1001").unwrap().unwrap().balance, dec!(42.50));

        let err = store.set_account_balance("AST-2000", dec!(1)).unwrap_err();
        assert_eq!(err, StoreError::NotFound("AST-2000".to_string()));
    }

    #[test]
    fn listing_twice_without_writes_is_identical() {
        let store = InMemoryLedgerStore::new();
        store.insert_account(cash()).unwrap();
        store.set_account_balance("AST-1001", dec!(10)).unwrap();

        assert_eq!(store.list_accounts().unwrap(), store.list_accounts().unwrap());
    }
}
