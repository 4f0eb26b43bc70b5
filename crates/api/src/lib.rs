//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for customers, transactions, payments, and backup
//! - The caller-identity extractor
//! - Error-to-response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tranzero_shared::types::Currency;
use tranzero_store::{CustomerRepository, LedgerRepository};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Customer-level operations and backup.
    pub customers: CustomerRepository,
    /// Transaction and payment operations.
    pub ledger: LedgerRepository,
    /// Currency used when formatting amounts in responses.
    pub currency: Currency,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
