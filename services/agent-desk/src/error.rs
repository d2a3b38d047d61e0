//! Query-scoped errors and their `{ok:false, error}` rendering

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_retrieval::DataRetrievalError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Empty or malformed user input
    #[error("{0}")]
    InvalidInput(String),

    /// Network/HTTP failure from any upstream source
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// Raw lookup found no pair; the advisory pipeline treats this as a normal outcome
    #[error("{0}")]
    NoDataFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<DataRetrievalError> for AgentError {
    fn from(err: DataRetrievalError) -> Self {
        AgentError::UpstreamUnavailable(err.to_string())
    }
}

impl From<QueryRejection> for AgentError {
    fn from(rejection: QueryRejection) -> Self {
        AgentError::InvalidInput(rejection.body_text())
    }
}

impl AgentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AgentError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            // Upstream trouble is reported in-band, like the dashboard expects
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        match &self {
            AgentError::InvalidInput(msg) => tracing::debug!("rejected request: {}", msg),
            AgentError::NoDataFound(_) => {}
            other => tracing::warn!("request failed: {}", other),
        }
        let body = Json(json!({ "ok": false, "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
