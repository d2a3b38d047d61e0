//! Solana account passthroughs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::{error::AgentError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct PubkeyQuery {
    pub pubkey: Option<String>,
}

impl PubkeyQuery {
    fn pubkey(&self) -> &str {
        self.pubkey.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub ok: bool,
    pub pubkey: String,
    pub lamports: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub sol: Decimal,
    pub updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SignaturesResponse {
    pub ok: bool,
    pub pubkey: String,
    pub sigs: Vec<Value>,
    pub updated: DateTime<Utc>,
}

/// GET /api/sol/balance?pubkey=
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PubkeyQuery>, QueryRejection>,
) -> Result<Json<BalanceResponse>, AgentError> {
    let Query(params) = params?;
    let balance = state.orchestrator.balance(params.pubkey()).await?;

    Ok(Json(BalanceResponse {
        ok: true,
        pubkey: params.pubkey().trim().to_string(),
        lamports: balance.lamports,
        sol: balance.sol,
        updated: Utc::now(),
    }))
}

/// GET /api/sol/tx?pubkey= - Most recent transaction signatures
pub async fn get_signatures(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PubkeyQuery>, QueryRejection>,
) -> Result<Json<SignaturesResponse>, AgentError> {
    let Query(params) = params?;
    let sigs = state.orchestrator.signatures(params.pubkey()).await?;

    Ok(Json(SignaturesResponse {
        ok: true,
        pubkey: params.pubkey().trim().to_string(),
        sigs,
        updated: Utc::now(),
    }))
}
