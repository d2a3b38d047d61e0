//! Brain module - deterministic fallback pipeline
//!
//! analyst → risk gate → decision, computed purely from a market snapshot.

pub mod analyst;
pub mod decision;
pub mod risk_gate;
pub mod signal;

use data_retrieval::MarketSnapshot;
use serde::Serialize;

pub use analyst::analyze;
pub use decision::{compose, Decision};
pub use risk_gate::assess;
pub use signal::{RiskStatus, RiskVerdict, Signal, SignalType};

/// Combined advisory for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentVerdict {
    #[serde(flatten)]
    pub signal: Signal,
    pub risk: RiskVerdict,
    pub decision: Decision,
}

impl AgentVerdict {
    /// The decision is always derived from the risk status
    pub fn from_parts(signal: Signal, risk: RiskVerdict) -> Self {
        let decision = compose(risk.status);
        Self {
            signal,
            risk,
            decision,
        }
    }
}

/// Rule-engine verdict, no LLM involved
pub fn evaluate(snapshot: Option<&MarketSnapshot>) -> AgentVerdict {
    let signal = analyze(snapshot);
    let risk = assess(snapshot, &signal);
    AgentVerdict::from_parts(signal, risk)
}
