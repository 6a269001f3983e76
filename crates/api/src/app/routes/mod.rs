use axum::Router;

pub mod accounts;
pub mod journals;
pub mod reports;
pub mod system;

/// Router for all ledger endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/accounts", accounts::router())
        .nest("/journals", journals::router())
        .nest("/reports", reports::router())
}
