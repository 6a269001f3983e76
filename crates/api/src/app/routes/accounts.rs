use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use bizledger_accounting::NewAccount;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route("/next-id/:prefix", get(next_account_id))
        .route("/:id", get(get_account))
}

pub async fn list_accounts(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.ledger().list_accounts() {
        Ok(accounts) => (StatusCode::OK, Json(dto::items(&accounts))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_account(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.ledger().get_account(&id) {
        Ok(account) => (StatusCode::OK, Json(dto::account_to_json(&account))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn next_account_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(prefix): Path<String>,
) -> axum::response::Response {
    match services.ledger().next_account_id(&prefix) {
        Ok(id) => (StatusCode::OK, Json(dto::next_id(id))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn create_account(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateAccountRequest>,
) -> axum::response::Response {
    let account_type = match errors::parse_account_type(&body.account_type) {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    let ledger = services.ledger();
    let created = match body.id {
        Some(id) => ledger.create_account(NewAccount::new(id, body.name, account_type, body.description)),
        None => ledger.open_account(&body.name, account_type, body.description),
    };

    match created {
        Ok(account) => (StatusCode::CREATED, Json(dto::account_to_json(&account))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
