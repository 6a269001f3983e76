//! Infrastructure layer: persistence boundary, ledger orchestration, config.

pub mod config;
pub mod ledger;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use ledger::{BalanceChange, Ledger, LedgerError, OrphanLine, PostingReceipt};
pub use store::{InMemoryLedgerStore, LedgerStore, StoreError};
