//! Ledger persistence boundary.
//!
//! The ledger only needs per-record reads and writes from its storage
//! collaborator. Nothing here is transactional across records.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryLedgerStore;
pub use r#trait::{LedgerStore, StoreError};
