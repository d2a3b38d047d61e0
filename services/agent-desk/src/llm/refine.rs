//! LLM refinement of the rule-engine verdict
//!
//! A refinement is accepted whole or not at all. It must carry a signal and
//! a `risk.status` from the closed sets; anything else falls back to the
//! rule engine.

use data_retrieval::MarketSnapshot;
use serde_json::Value;
use tracing::{debug, warn};

use super::LlmCapability;
use crate::brain::signal::{
    bounded, RiskStatus, RiskVerdict, Signal, SignalType, MAX_CHECKLIST, MAX_FLAGS,
    MAX_QUESTIONS, MAX_WHY,
};
use crate::brain::AgentVerdict;

pub const SYSTEM_PROMPT: &str = r#"You are a trading copilot (Intercom-style).
Return STRICT JSON only:
{
  "signal":"BUY|SELL|HOLD",
  "why":["...","...","..."],
  "questions":["..."],
  "risk":{"status":"SAFE|CAUTION|BLOCK","flags":["...","..."],"checklist":["...","..."]},
  "decision":"OK TO PROCEED|SMALL SIZE / WAIT|DO NOT TRADE"
}
why: max 3 short bullets. questions: max 2, only if something critical is missing.
flags: max 4. checklist: max 4.
No hype. No guarantees."#;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RefinementError {
    #[error("refinement is not a JSON object")]
    NotAnObject,

    #[error("refinement has no signal")]
    MissingSignal,

    #[error("unknown signal {0:?}")]
    UnknownSignal(String),

    #[error("refinement has no risk.status")]
    MissingRiskStatus,

    #[error("unknown risk status {0:?}")]
    UnknownRiskStatus(String),
}

pub fn build_user_prompt(query: &str, chain: Option<&str>, snapshot: &MarketSnapshot) -> String {
    let snapshot_json =
        serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Token query: {}\nChain hint: {}\nDexscreener snapshot:\n{}\n\nUse the snapshot only.",
        query,
        chain.unwrap_or("none"),
        snapshot_json
    )
}

/// Check the shape contract and build a verdict from an LLM payload
///
/// Lists are truncated to their limits; the decision is recomposed from the
/// accepted status rather than trusted from the payload.
pub fn validate_refinement(payload: &Value) -> Result<AgentVerdict, RefinementError> {
    let object = payload.as_object().ok_or(RefinementError::NotAnObject)?;

    let raw_signal = object
        .get("signal")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(RefinementError::MissingSignal)?;
    let signal = SignalType::parse(raw_signal)
        .ok_or_else(|| RefinementError::UnknownSignal(raw_signal.to_string()))?;

    let risk = object.get("risk").and_then(Value::as_object);
    let raw_status = risk
        .and_then(|r| r.get("status"))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or(RefinementError::MissingRiskStatus)?;
    let status = RiskStatus::parse(raw_status)
        .ok_or_else(|| RefinementError::UnknownRiskStatus(raw_status.to_string()))?;

    let signal = Signal {
        signal,
        why: bounded(strings(object.get("why")), MAX_WHY),
        questions: bounded(strings(object.get("questions")), MAX_QUESTIONS),
    };
    let risk = RiskVerdict {
        status,
        flags: bounded(strings(risk.and_then(|r| r.get("flags"))), MAX_FLAGS),
        checklist: bounded(strings(risk.and_then(|r| r.get("checklist"))), MAX_CHECKLIST),
    };

    Ok(AgentVerdict::from_parts(signal, risk))
}

/// String items of a JSON array; anything else is empty
fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// One refinement attempt; `None` means "use the rule engine"
pub async fn refine(
    llm: &LlmCapability,
    snapshot: &MarketSnapshot,
    query: &str,
    chain: Option<&str>,
) -> Option<AgentVerdict> {
    let completer = match llm {
        LlmCapability::Configured(completer) => completer,
        LlmCapability::NotConfigured => return None,
    };

    let user = build_user_prompt(query, chain, snapshot);
    let payload = match completer.complete_json(SYSTEM_PROMPT, &user).await {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            debug!(query, "LLM reply held no JSON, using rule engine");
            return None;
        }
        Err(e) => {
            warn!(query, error = %e, "LLM refinement failed, using rule engine");
            return None;
        }
    };

    match validate_refinement(&payload) {
        Ok(verdict) => Some(verdict),
        Err(e) => {
            debug!(query, reason = %e, "refinement rejected");
            None
        }
    }
}
