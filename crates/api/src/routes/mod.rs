//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod account_status;
pub mod backup;
pub mod customers;
pub mod health;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(customers::routes())
        .merge(transactions::routes())
        .merge(backup::routes())
        .merge(account_status::routes())
}
