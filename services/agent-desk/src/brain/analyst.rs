//! Analyst stage: rule-based signal from a market snapshot
//!
//! The rules only ever produce HOLD. BUY and SELL can only come from an
//! accepted LLM refinement.

use data_retrieval::MarketSnapshot;

use crate::brain::signal::Signal;

/// Liquidity and 24h volume both strictly above this read as healthy
pub const HEALTHY_MARKET_USD: f64 = 50_000.0;

pub fn analyze(snapshot: Option<&MarketSnapshot>) -> Signal {
    let Some(market) = snapshot else {
        return Signal::hold(
            &[
                "No market data found for that query.",
                "Try using a contract address for accuracy.",
            ],
            &["What is the token contract address?"],
        );
    };

    let liq = market.liquidity_usd;
    let vol = market.volume_24h;

    if liq > HEALTHY_MARKET_USD && vol > HEALTHY_MARKET_USD {
        Signal::hold(
            &[
                "Healthy liquidity and volume detected.",
                "Still need confirmation before entries.",
            ],
            &[],
        )
    } else {
        Signal::hold(
            &[
                "Liquidity/volume looks low or uncertain.",
                "Higher risk of slippage/manipulation.",
            ],
            &[],
        )
    }
}
