//! Optional language-model capability
//!
//! The pipeline never depends on an LLM being present: callers match on
//! [`LlmCapability`] instead of checking for a null client.

pub mod groq;
pub mod refine;

use serde_json::Value;
use std::sync::Arc;

pub use groq::GroqClient;
pub use refine::{refine, validate_refinement, RefinementError};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Http(String),

    #[error("LLM returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM response unreadable: {0}")]
    InvalidResponse(String),
}

/// Chat model that answers with a JSON object
#[async_trait::async_trait]
pub trait JsonCompleter: Send + Sync {
    /// Parsed JSON from the reply; `None` when the reply holds no JSON
    async fn complete_json(&self, system: &str, user: &str) -> Result<Option<Value>, LlmError>;

    fn model(&self) -> &str;
}

#[derive(Clone)]
pub enum LlmCapability {
    Configured(Arc<dyn JsonCompleter>),
    NotConfigured,
}

impl LlmCapability {
    /// Groq when an API key is set, otherwise not configured
    pub fn groq(api_key: &str, model: &str, base_url: &str) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Ok(LlmCapability::NotConfigured);
        }
        let client = GroqClient::new(api_key, model, base_url)?;
        Ok(LlmCapability::Configured(Arc::new(client)))
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, LlmCapability::Configured(_))
    }

    /// Human-readable label for startup logs
    pub fn describe(&self) -> String {
        match self {
            LlmCapability::Configured(llm) => format!("Groq AI ({})", llm.model()),
            LlmCapability::NotConfigured => "Fallback (no API)".to_string(),
        }
    }
}

impl std::fmt::Debug for LlmCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}
