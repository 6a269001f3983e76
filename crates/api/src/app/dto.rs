use serde::Deserialize;
use serde_json::{json, Value};

use bizledger_accounting::{Account, JournalEntry};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Explicit id; derived from the type prefix when absent.
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub description: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn items<T: serde::Serialize>(items: &[T]) -> Value {
    json!({ "items": items })
}

pub fn next_id(id: String) -> Value {
    json!({ "id": id })
}

pub fn account_to_json(account: &Account) -> Value {
    json!(account)
}

pub fn journal_to_json(entry: &JournalEntry) -> Value {
    json!({
        "id": entry.id,
        "date": entry.date,
        "notes": entry.notes,
        "lines": entry.lines,
        "totalDebit": entry.total_debit(),
        "totalCredit": entry.total_credit(),
    })
}
