use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bizledger_accounting::AccountType;
use bizledger_infra::LedgerError;

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::Validation(errors) => {
            let code = if errors.is_unbalanced() {
                "unbalanced_entry"
            } else {
                "validation_error"
            };
            (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "error": code,
                    "message": errors.to_string(),
                    "fields": errors,
                })),
            )
                .into_response()
        }
        LedgerError::DuplicateName(name) => json_error(
            StatusCode::CONFLICT,
            "duplicate_name",
            format!("an account named {name:?} already exists"),
        ),
        LedgerError::DuplicateId(id) => json_error(
            StatusCode::CONFLICT,
            "duplicate_id",
            format!("account id {id:?} is already in use"),
        ),
        LedgerError::NotFound(what) => json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found")),
        LedgerError::Store(e) => {
            tracing::error!(error = %e, "ledger store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "persistence_error",
                "the ledger could not be read or written",
            )
        }
        LedgerError::PartiallyPosted {
            entry_id,
            applied,
            source,
        } => {
            tracing::error!(%entry_id, applied, error = %source, "journal entry partially posted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({
                    "error": "partially_posted",
                    "message": "journal entry was saved but not all balances were updated",
                    "entry_id": entry_id,
                })),
            )
                .into_response()
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_account_type(s: &str) -> Result<AccountType, axum::response::Response> {
    s.parse().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_account_type",
            "type must be one of: Assets, Liabilities, Equity, Income, Expense",
        )
    })
}
