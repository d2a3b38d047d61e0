//! Risk gate stage: go/no-go verdict from liquidity and volume
//!
//! Liquidity is evaluated before volume and a BLOCK is never downgraded.
//! The rules stop at CAUTION; SAFE only comes from an accepted refinement.

use data_retrieval::MarketSnapshot;
use tracing::debug;

use crate::brain::signal::{RiskStatus, RiskVerdict, Signal};

/// Below this liquidity the pair is blocked outright
pub const MIN_LIQUIDITY_USD: f64 = 5_000.0;
/// Below this liquidity slippage is expected
pub const LOW_LIQUIDITY_USD: f64 = 20_000.0;
/// Below this 24h volume the price is easy to push around
pub const MIN_VOLUME_USD: f64 = 5_000.0;

pub const CHECKLIST: [&str; 4] = [
    "verify contract address",
    "check liquidity depth",
    "check top holders",
    "start small test trade",
];

pub fn assess(snapshot: Option<&MarketSnapshot>, signal: &Signal) -> RiskVerdict {
    // No snapshot is judged as an empty market
    let (liq, vol) = snapshot
        .map(|m| (m.liquidity_usd, m.volume_24h))
        .unwrap_or((0.0, 0.0));

    let mut flags = Vec::new();
    let mut status = if liq < MIN_LIQUIDITY_USD {
        flags.push("Very low liquidity → high slippage / rug risk.".to_string());
        RiskStatus::Block
    } else if liq < LOW_LIQUIDITY_USD {
        flags.push("Low liquidity → expect slippage.".to_string());
        RiskStatus::Caution
    } else {
        RiskStatus::Caution
    };

    if vol < MIN_VOLUME_USD {
        flags.push("Very low 24h volume → easy to manipulate.".to_string());
        if status != RiskStatus::Block {
            status = RiskStatus::Caution;
        }
    }

    debug!(liq, vol, signal = %signal.signal, status = %status, "risk gate assessed");

    RiskVerdict {
        status,
        flags,
        checklist: CHECKLIST.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::analyst::analyze;
    use crate::brain::signal::MAX_FLAGS;
    use crate::brain::test_support::snapshot;

    fn gate(liq: f64, vol: f64) -> RiskVerdict {
        let market = snapshot(liq, vol);
        assess(Some(&market), &analyze(Some(&market)))
    }

    #[test]
    fn test_absent_snapshot_blocks() {
        let verdict = assess(None, &analyze(None));

        assert_eq!(verdict.status, RiskStatus::Block);
        assert_eq!(verdict.flags.len(), 2);
    }

    #[test]
    fn test_thin_market_blocks_with_both_flags() {
        let verdict = gate(3_000.0, 1_000.0);

        assert_eq!(verdict.status, RiskStatus::Block);
        assert_eq!(
            verdict.flags,
            vec![
                "Very low liquidity → high slippage / rug risk.",
                "Very low 24h volume → easy to manipulate.",
            ]
        );
    }

    #[test]
    fn test_low_liquidity_is_caution() {
        let verdict = gate(10_000.0, 100_000.0);

        assert_eq!(verdict.status, RiskStatus::Caution);
        assert_eq!(verdict.flags, vec!["Low liquidity → expect slippage."]);
    }

    #[test]
    fn test_low_volume_alone_is_caution() {
        let verdict = gate(100_000.0, 4_999.0);

        assert_eq!(verdict.status, RiskStatus::Caution);
        assert_eq!(verdict.flags, vec!["Very low 24h volume → easy to manipulate."]);
    }

    #[test]
    fn test_healthy_market_is_still_caution() {
        let verdict = gate(60_000.0, 80_000.0);

        assert_eq!(verdict.status, RiskStatus::Caution);
        assert!(verdict.flags.is_empty());
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(gate(4_999.99, 1e6).status, RiskStatus::Block);
        assert_eq!(gate(5_000.0, 1e6).status, RiskStatus::Caution);
        assert_eq!(gate(19_999.0, 1e6).flags.len(), 1);
        assert!(gate(20_000.0, 5_000.0).flags.is_empty());
    }

    #[test]
    fn test_block_is_monotonic_in_liquidity() {
        for vol in [0.0, 1_000.0, 10_000.0, 1e9] {
            let mut liq = 4_999.0;
            while liq >= 0.0 {
                assert_eq!(gate(liq, vol).status, RiskStatus::Block, "liq={liq} vol={vol}");
                liq -= 250.0;
            }
        }
    }

    #[test]
    fn test_checklist_is_static() {
        for (liq, vol) in [(0.0, 0.0), (1e4, 1e3), (1e9, 1e9)] {
            let verdict = gate(liq, vol);
            assert_eq!(verdict.checklist.len(), 4);
            assert_eq!(verdict.checklist[0], "verify contract address");
            assert!(verdict.flags.len() <= MAX_FLAGS);
        }
        assert_eq!(assess(None, &analyze(None)).checklist.len(), 4);
    }

    #[test]
    fn test_rules_never_emit_safe() {
        for liq in [0.0, 5_000.0, 20_000.0, 1e12] {
            for vol in [0.0, 5_000.0, 1e12] {
                assert_ne!(gate(liq, vol).status, RiskStatus::Safe);
            }
        }
    }
}
