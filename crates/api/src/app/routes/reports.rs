use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/trial-balance", get(trial_balance))
        .route("/reconciliation", get(reconciliation))
}

pub async fn trial_balance(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.ledger().trial_balance() {
        Ok(tb) => {
            let balanced = tb.is_balanced();
            (StatusCode::OK, Json(json!({ "report": tb, "balanced": balanced }))).into_response()
        }
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn reconciliation(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.ledger().reconcile() {
        Ok(drift) => (
            StatusCode::OK,
            Json(json!({ "consistent": drift.is_empty(), "drift": drift })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
