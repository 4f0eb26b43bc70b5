//! Customer management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use tracing::info;
use tranzero_core::customer::Customer;
use tranzero_core::ledger::LedgerTotals;
use tranzero_shared::types::{CustomerId, TeamId};
use tranzero_store::repositories::{NewCustomer, UpdateCustomer};

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams/{team_id}/customers", get(list_customers))
        .route("/teams/{team_id}/customers", post(create_customer))
        .route("/teams/{team_id}/customers/{customer_id}", get(get_customer))
        .route("/teams/{team_id}/customers/{customer_id}", put(update_customer))
        .route("/teams/{team_id}/customers/{customer_id}", delete(delete_customer))
        .route("/teams/{team_id}/summary", get(team_summary))
}

/// A customer with their computed running totals.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    /// The customer and their transactions.
    #[serde(flatten)]
    pub customer: Customer,
    /// Remaining balances across the customer's open transactions.
    pub totals: LedgerTotals,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        let totals = LedgerTotals::running(&customer.transactions);
        Self { customer, totals }
    }
}

/// GET `/teams/{team_id}/customers` - List active customers, newest edits first.
async fn list_customers(
    State(state): State<AppState>,
    _caller: Caller,
    Path(team_id): Path<TeamId>,
) -> Result<impl IntoResponse, ApiError> {
    let customers = state.customers.list(&team_id).await?;
    let response: Vec<CustomerResponse> = customers.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST `/teams/{team_id}/customers` - Create a customer.
async fn create_customer(
    State(state): State<AppState>,
    caller: Caller,
    Path(team_id): Path<TeamId>,
    Json(payload): Json<NewCustomer>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state
        .customers
        .add(&team_id, caller.context(), payload)
        .await?;
    info!(team_id = %team_id, customer_id = %customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// GET `/teams/{team_id}/customers/{customer_id}` - Get one customer.
async fn get_customer(
    State(state): State<AppState>,
    _caller: Caller,
    Path((team_id, customer_id)): Path<(TeamId, CustomerId)>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.customers.get(&team_id, &customer_id).await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// PUT `/teams/{team_id}/customers/{customer_id}` - Update profile fields.
async fn update_customer(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id)): Path<(TeamId, CustomerId)>,
    Json(payload): Json<UpdateCustomer>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state
        .customers
        .update(&team_id, caller.context(), &customer_id, payload)
        .await?;
    Ok(Json(CustomerResponse::from(customer)))
}

/// DELETE `/teams/{team_id}/customers/{customer_id}` - Soft-delete a customer.
async fn delete_customer(
    State(state): State<AppState>,
    caller: Caller,
    Path((team_id, customer_id)): Path<(TeamId, CustomerId)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .customers
        .soft_delete(&team_id, caller.context(), &customer_id)
        .await?;
    info!(team_id = %team_id, customer_id = %customer_id, "Customer removed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/teams/{team_id}/summary` - Running and outstanding team totals.
async fn team_summary(
    State(state): State<AppState>,
    _caller: Caller,
    Path(team_id): Path<TeamId>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.customers.summary(&team_id).await?;
    Ok(Json(summary))
}
