//! Tranzero API Server
//!
//! Main entry point for the Tranzero ledger service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tranzero_api::{AppState, create_router};
use tranzero_shared::AppConfig;
use tranzero_store::{CustomerRepository, LedgerRepository, LogActivityRecorder, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tranzero=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Wire up storage and repositories
    let store = Arc::new(MemoryStore::new());
    let activity = Arc::new(LogActivityRecorder::new());
    let state = AppState {
        customers: CustomerRepository::new(store.clone(), activity.clone()),
        ledger: LedgerRepository::new(store, activity),
        currency: config.ledger.currency,
    };
    info!(currency = %config.ledger.currency, "Ledger configured");

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
