//! Final directive from the risk status

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::brain::signal::RiskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "DO NOT TRADE")]
    DoNotTrade,
    #[serde(rename = "SMALL SIZE / WAIT")]
    SmallSizeWait,
    #[serde(rename = "OK TO PROCEED")]
    OkToProceed,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::DoNotTrade => "DO NOT TRADE",
            Decision::SmallSizeWait => "SMALL SIZE / WAIT",
            Decision::OkToProceed => "OK TO PROCEED",
        }
    }

    /// Terminal banner line
    pub fn headline(&self) -> String {
        match self {
            Decision::DoNotTrade => format!("❌ {}", self.as_str()),
            Decision::SmallSizeWait => format!("⚠️ {}", self.as_str()),
            Decision::OkToProceed => format!("✅ {} (still manage risk)", self.as_str()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn compose(status: RiskStatus) -> Decision {
    match status {
        RiskStatus::Block => Decision::DoNotTrade,
        RiskStatus::Caution => Decision::SmallSizeWait,
        RiskStatus::Safe => Decision::OkToProceed,
    }
}
