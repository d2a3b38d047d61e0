use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument};

use super::{JsonCompleter, LlmError};

pub const GROQ_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq chat-completions client (OpenAI-compatible API)
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl JsonCompleter for GroqClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete_json(&self, system: &str, user: &str) -> Result<Option<Value>, LlmError> {
        let payload = json!({
            "model": self.model,
            "temperature": 0.2,
            "messages": [
                { "role": "system", "content": format!("{}\nReturn STRICT JSON only. No markdown.", system) },
                { "role": "user", "content": user },
            ],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        let text = body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("{}");

        debug!(chars = text.len(), "LLM reply received");
        Ok(extract_json(text))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Parse a reply as JSON, falling back to the outermost `{...}` span
pub fn extract_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_json() {
        let value = extract_json(r#"{"signal":"HOLD"}"#).unwrap();
        assert_eq!(value["signal"], "HOLD");
    }

    #[test]
    fn test_extract_wrapped_json() {
        let reply = "Sure! ```json\n{\"signal\":\"BUY\",\"risk\":{\"status\":\"SAFE\"}}\n``` hope it helps";
        let value = extract_json(reply).unwrap();
        assert_eq!(value["risk"]["status"], "SAFE");
    }

    #[test]
    fn test_extract_garbage() {
        assert!(extract_json("no json here").is_none());
        assert!(extract_json("} backwards {").is_none());
        assert!(extract_json("{ not: valid }").is_none());
    }
}
