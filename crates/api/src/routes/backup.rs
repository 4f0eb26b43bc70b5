//! CSV backup routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tracing::info;
use tranzero_shared::types::{CustomerId, TeamId};

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

/// Filename suggested for downloaded backups.
const BACKUP_FILENAME: &str = "tranzero-backup.csv";

/// Creates the backup routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams/{team_id}/export", get(export_csv))
        .route(
            "/teams/{team_id}/customers/{customer_id}/export",
            get(export_customer_csv),
        )
        .route("/teams/{team_id}/import", post(import_csv))
}

/// Response for a completed import.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// How many customers were imported.
    pub imported: usize,
}

/// GET `/teams/{team_id}/export` - Download the team's ledger as CSV.
async fn export_csv(
    State(state): State<AppState>,
    _caller: Caller,
    Path(team_id): Path<TeamId>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = state.customers.export_csv(&team_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{BACKUP_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

/// GET `.../customers/{customer_id}/export` - Download one customer's statement.
async fn export_customer_csv(
    State(state): State<AppState>,
    _caller: Caller,
    Path((team_id, customer_id)): Path<(TeamId, CustomerId)>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = state
        .customers
        .export_customer_csv(&team_id, &customer_id)
        .await?;
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string())],
        csv,
    ))
}

/// POST `/teams/{team_id}/import` - Restore a CSV backup, upserting by ID.
async fn import_csv(
    State(state): State<AppState>,
    caller: Caller,
    Path(team_id): Path<TeamId>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let imported = state
        .customers
        .import_csv(&team_id, caller.context(), &body)
        .await?;
    info!(team_id = %team_id, imported, "Backup imported");
    Ok((StatusCode::CREATED, Json(ImportResponse { imported })))
}
