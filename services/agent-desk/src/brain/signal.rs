//! Advisory outputs of the analyst and risk gate stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bounds on the advisory lists
pub const MAX_WHY: usize = 3;
pub const MAX_QUESTIONS: usize = 2;
pub const MAX_FLAGS: usize = 4;
pub const MAX_CHECKLIST: usize = 4;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
            SignalType::Hold => "HOLD",
        }
    }

    /// Case-insensitive parse; `None` outside {BUY, SELL, HOLD}
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "BUY" => Some(SignalType::Buy),
            "SELL" => Some(SignalType::Sell),
            "HOLD" => Some(SignalType::Hold),
            _ => None,
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyst output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal: SignalType,
    /// At most [`MAX_WHY`] short reasons
    pub why: Vec<String>,
    /// At most [`MAX_QUESTIONS`]; empty unless critical input is missing
    pub questions: Vec<String>,
}

impl Signal {
    pub fn hold(why: &[&str], questions: &[&str]) -> Self {
        Self {
            signal: SignalType::Hold,
            why: bounded(why.iter().map(|s| s.to_string()).collect(), MAX_WHY),
            questions: bounded(questions.iter().map(|s| s.to_string()).collect(), MAX_QUESTIONS),
        }
    }
}

/// Risk gate status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskStatus {
    Safe,
    Caution,
    Block,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Safe => "SAFE",
            RiskStatus::Caution => "CAUTION",
            RiskStatus::Block => "BLOCK",
        }
    }

    /// Case-insensitive parse; `None` outside {SAFE, CAUTION, BLOCK}
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "SAFE" => Some(RiskStatus::Safe),
            "CAUTION" => Some(RiskStatus::Caution),
            "BLOCK" => Some(RiskStatus::Block),
            _ => None,
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk gate output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub status: RiskStatus,
    pub flags: Vec<String>,
    pub checklist: Vec<String>,
}

/// Keep the first `max` items
pub fn bounded(mut items: Vec<String>, max: usize) -> Vec<String> {
    items.truncate(max);
    items
}
