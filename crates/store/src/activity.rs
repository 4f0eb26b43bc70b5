//! Activity recording for audit trails.
//!
//! Recording is fire-and-forget: a failure to record never fails the
//! mutation it describes, so the trait is infallible by construction.

use async_trait::async_trait;
use tranzero_shared::types::{RequestContext, TeamId};

/// Records who did what, per team.
#[async_trait]
pub trait ActivityRecorder: Send + Sync {
    /// Records one activity entry.
    async fn record(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        action: &str,
        details: serde_json::Value,
    );
}

/// Recorder that emits structured log events.
#[derive(Debug, Default)]
pub struct LogActivityRecorder;

impl LogActivityRecorder {
    /// Creates the recorder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActivityRecorder for LogActivityRecorder {
    async fn record(
        &self,
        team: &TeamId,
        ctx: &RequestContext,
        action: &str,
        details: serde_json::Value,
    ) {
        tracing::info!(
            team_id = %team,
            user_id = %ctx.user_id,
            user_name = %ctx.user_name,
            %details,
            "{action}"
        );
    }
}

/// In-memory recorder for asserting on recorded activity in tests.
#[derive(Debug, Default)]
pub struct MemoryActivityRecorder {
    entries: std::sync::Mutex<Vec<String>>,
}

impl MemoryActivityRecorder {
    /// Returns the recorded action strings, oldest first.
    #[must_use]
    pub fn actions(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ActivityRecorder for MemoryActivityRecorder {
    async fn record(
        &self,
        _team: &TeamId,
        _ctx: &RequestContext,
        action: &str,
        _details: serde_json::Value,
    ) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(action.to_string());
        }
    }
}
