//! Health endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{orchestrator::HealthReport, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub report: HealthReport,
}

/// GET /api/health - Never calls upstream; source health comes from real traffic
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        report: state.orchestrator.health().await,
    })
}
