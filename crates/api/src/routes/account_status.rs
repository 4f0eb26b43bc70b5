//! Account status analysis route.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tranzero_core::account::{AccountStatus, analyze_account_status};
use tranzero_shared::types::format_amount;

use crate::AppState;

/// Creates the account status route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/account-status", post(analyze))
}

/// Request body with aggregate totals to classify.
#[derive(Debug, Deserialize)]
pub struct AccountStatusRequest {
    /// Total owed to the ledger owner.
    pub receivable: Decimal,
    /// Total owed by the ledger owner.
    pub payable: Decimal,
}

/// Classification response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatusResponse {
    /// Receivable minus payable.
    pub net_balance: Decimal,
    /// `Credit`, `Debit`, or `Settled`.
    pub account_status: AccountStatus,
    /// Net balance rendered in the configured currency.
    pub formatted_balance: String,
}

/// POST `/account-status` - Classify an account from its totals.
async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AccountStatusRequest>,
) -> impl IntoResponse {
    let analysis = analyze_account_status(payload.receivable, payload.payable);
    Json(AccountStatusResponse {
        net_balance: analysis.net_balance,
        account_status: analysis.account_status,
        formatted_balance: format_amount(analysis.net_balance, state.currency),
    })
}
