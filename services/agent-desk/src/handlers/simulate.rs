//! Simulate endpoint - constant-product swap dry run

use axum::{body::Bytes, Json};
use serde::Serialize;

use crate::{
    error::AgentError,
    swap::{self, SwapInput, SwapOutcome, SwapRequest},
};

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub ok: bool,
    pub input: SwapInput,
    pub result: SwapOutcome,
}

/// POST /api/simulate - An empty body runs the default pool
pub async fn simulate_swap(body: Bytes) -> Result<Json<SimulateResponse>, AgentError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        SwapRequest::default()
    } else {
        serde_json::from_slice::<SwapRequest>(&body)
            .map_err(|_| AgentError::InvalidInput("Bad input".to_string()))?
    };

    let quote = swap::simulate(SwapInput::from(request))?;

    Ok(Json(SimulateResponse {
        ok: true,
        input: quote.input,
        result: quote.result,
    }))
}
