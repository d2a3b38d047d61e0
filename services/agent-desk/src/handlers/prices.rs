use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{error::AgentError, AppState};

/// GET /api/prices - BTC/ETH/SOL in USD with 24h change
pub async fn get_prices(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AgentError> {
    let data = state.orchestrator.prices().await?;

    Ok(Json(json!({
        "ok": true,
        "data": data,
        "updated": Utc::now(),
    })))
}
