//! Market snapshot and advisory endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use data_retrieval::MarketSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    brain::AgentVerdict,
    error::AgentError,
    orchestrator::AnalysisMode,
    AppState,
};

pub const NO_PAIRS: &str = "No pairs found. Try CA for accuracy.";

#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub q: Option<String>,
    /// Optional chain hint (`sol`, `eth`, `bsc`, `base`, ...)
    pub chain: Option<String>,
}

impl TokenQuery {
    fn required(&self, missing: &str) -> Result<String, AgentError> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AgentError::InvalidInput(missing.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct DexResponse {
    pub ok: bool,
    pub q: String,
    pub data: MarketSnapshot,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub ok: bool,
    pub q: String,
    pub chain: Option<String>,
    /// `null` when no pair matched; the agent output covers that branch
    pub dex: Option<MarketSnapshot>,
    pub agent: AgentVerdict,
    pub mode: AnalysisMode,
    pub updated: DateTime<Utc>,
}

/// GET /api/dex?q= - Normalized snapshot for a symbol or contract address
pub async fn get_dex(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<DexResponse>, AgentError> {
    let Query(params) = params?;
    let q = params.required("Missing q (symbol or CA)")?;

    let data = state
        .orchestrator
        .snapshot(&q)
        .await?
        .ok_or_else(|| AgentError::NoDataFound(NO_PAIRS.to_string()))?;

    Ok(Json(DexResponse {
        ok: true,
        q,
        data,
        updated: Utc::now(),
    }))
}

/// GET /api/agent/analyze?q=&chain= - Full advisory pipeline
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<AnalyzeResponse>, AgentError> {
    let Query(params) = params?;
    let q = params.required("Missing q")?;

    let outcome = state
        .orchestrator
        .run_query(params.chain.as_deref(), &q)
        .await?;

    Ok(Json(AnalyzeResponse {
        ok: true,
        q: outcome.query,
        chain: outcome.chain,
        dex: outcome.snapshot,
        agent: outcome.verdict,
        mode: outcome.mode,
        updated: Utc::now(),
    }))
}
