//! Transaction and payment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use tranzero_core::ledger::NewTransaction;
use tranzero_shared::types::{CustomerId, PaymentId, TeamId, TransactionId};
use tranzero_store::repositories::{BulkStatus, UpdateTransaction};

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/teams/{team_id}/customers/{customer_id}/transactions",
            post(create_transaction),
        )
        .route(
            "/teams/{team_id}/customers/{customer_id}/transactions/bulk-status",
            post(bulk_update_status),
        )
        .route(
            "/teams/{team_id}/customers/{customer_id}/transactions/bulk-delete",
            post(bulk_delete),
        )
        .route(
            "/teams/{team_id}/customers/{customer_id}/transactions/{transaction_id}",
            put(update_transaction),
        )
        .route(
            "/teams/{team_id}/customers/{customer_id}/transactions/{transaction_id}",
            delete(delete_transaction),
        )
        .route(
            "/teams/{team_id}/customers/{customer_id}/transactions/{transaction_id}/toggle",
            post(toggle_status),
        )
        .route(
            "/teams/{team_id}/customers/{customer_id}/transactions/{transaction_id}/payments",
            post(add_payment),
        )
        .route(
            "/teams/{team_id}/customers/{customer_id}/transactions/{transaction_id}/payments/{payment_id}",
            delete(delete_payment),
        )
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct AddPaymentRequest {
    /// Payment amount (must be positive, at most the remaining balance).
    pub amount: Decimal,
}

/// Request body for a bulk status change.
#[derive(Debug, Deserialize)]
pub struct BulkStatusRequest {
    /// Transactions to update; unknown IDs are skipped.
    pub transaction_ids: Vec<TransactionId>,
    /// Target status, `paid` or `unpaid`.
    pub status: BulkStatus,
}

/// Request body for a bulk delete.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    /// Transactions to delete; unknown IDs are skipped.
    pub transaction_ids: Vec<TransactionId>,
}

/// Response for bulk operations.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    /// How many transactions were affected.
    pub affected: usize,
}

/// POST `.../transactions` - Add a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id)): Path<(TeamId, CustomerId)>,
    Json(payload): Json<NewTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .ledger
        .add_transaction(&team_id, caller.context(), &customer_id, payload)
        .await?;
    info!(team_id = %team_id, transaction_id = %transaction.id, "Transaction added");
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// PUT `.../transactions/{transaction_id}` - Edit description and amounts.
async fn update_transaction(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id, transaction_id)): Path<(TeamId, CustomerId, TransactionId)>,
    Json(payload): Json<UpdateTransaction>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .ledger
        .update_transaction(&team_id, caller.context(), &customer_id, &transaction_id, payload)
        .await?;
    Ok(Json(transaction))
}

/// DELETE `.../transactions/{transaction_id}` - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id, transaction_id)): Path<(TeamId, CustomerId, TransactionId)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ledger
        .delete_transaction(&team_id, caller.context(), &customer_id, &transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `.../transactions/{transaction_id}/toggle` - Flip paid/unpaid.
async fn toggle_status(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id, transaction_id)): Path<(TeamId, CustomerId, TransactionId)>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .ledger
        .toggle_transaction_status(&team_id, caller.context(), &customer_id, &transaction_id)
        .await?;
    Ok(Json(transaction))
}

/// POST `.../transactions/{transaction_id}/payments` - Record a payment.
async fn add_payment(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id, transaction_id)): Path<(TeamId, CustomerId, TransactionId)>,
    Json(payload): Json<AddPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state
        .ledger
        .add_payment(
            &team_id,
            caller.context(),
            &customer_id,
            &transaction_id,
            payload.amount,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// DELETE `.../payments/{payment_id}` - Delete a payment.
async fn delete_payment(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id, transaction_id, payment_id)): Path<(
        TeamId,
        CustomerId,
        TransactionId,
        PaymentId,
    )>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .ledger
        .delete_payment(
            &team_id,
            caller.context(),
            &customer_id,
            &transaction_id,
            &payment_id,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `.../transactions/bulk-status` - Mark a batch paid or unpaid.
async fn bulk_update_status(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id)): Path<(TeamId, CustomerId)>,
    Json(payload): Json<BulkStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let affected = state
        .ledger
        .bulk_update_status(
            &team_id,
            caller.context(),
            &customer_id,
            &payload.transaction_ids,
            payload.status,
        )
        .await?;
    Ok(Json(BulkResponse { affected }))
}

/// POST `.../transactions/bulk-delete` - Delete a batch of transactions.
async fn bulk_delete(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id)): Path<(TeamId, CustomerId)>,
    Json(payload): Json<BulkDeleteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let affected = state
        .ledger
        .bulk_delete_transactions(
            &team_id,
            caller.context(),
            &customer_id,
            &payload.transaction_ids,
        )
        .await?;
    Ok(Json(BulkResponse { affected }))
}
