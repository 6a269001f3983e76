use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use bizledger_accounting::JournalEntryInput;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_journals).post(post_journal_entry))
        .route("/next-id", get(next_journal_id))
        .route("/:id", get(get_journal))
}

pub async fn list_journals(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.ledger().list_journals() {
        Ok(journals) => {
            let items = journals.iter().map(dto::journal_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(dto::items(&items))).into_response()
        }
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_journal(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.ledger().get_journal(&id) {
        Ok(entry) => (StatusCode::OK, Json(dto::journal_to_json(&entry))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn next_journal_id(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.ledger().next_journal_id() {
        Ok(id) => (StatusCode::OK, Json(dto::next_id(id))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn post_journal_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<JournalEntryInput>,
) -> axum::response::Response {
    match services.ledger().submit_journal_entry(&body) {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
