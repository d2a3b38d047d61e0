//! Plain-text report sections for the terminal wizard

use data_retrieval::MarketSnapshot;

use crate::brain::{RiskVerdict, Signal};
use crate::swap::SwapQuote;

/// Compact dollar amount: `$1.23K`, `$4.56M`, `$7.89B`
pub fn fmt_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "N/A".to_string();
    }
    if amount >= 1_000_000_000.0 {
        format!("${:.2}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("${:.2}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.2}K", amount / 1_000.0)
    } else {
        format!("${:.2}", amount)
    }
}

pub fn snapshot_lines(snapshot: &MarketSnapshot) -> Vec<String> {
    vec![
        format!("Name: {} ({})", snapshot.name, snapshot.symbol),
        format!("Chain: {} | DEX: {}", snapshot.chain, snapshot.dex),
        format!("Price: {}", snapshot.price_usd),
        format!("Liquidity: {}", fmt_usd(snapshot.liquidity_usd)),
        format!("24h Volume: {}", fmt_usd(snapshot.volume_24h)),
    ]
}

fn bullets(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items.iter().map(|item| format!("- {}", item))
}

pub fn analyst_lines(signal: &Signal) -> Vec<String> {
    let mut lines = vec![format!("Signal: {}", signal.signal)];
    lines.extend(bullets(&signal.why));

    if !signal.questions.is_empty() {
        lines.push(String::new());
        lines.push("Questions:".to_string());
        lines.extend(bullets(&signal.questions));
    }
    lines
}

pub fn risk_lines(risk: &RiskVerdict) -> Vec<String> {
    let mut lines = vec![format!("Status: {}", risk.status)];
    lines.extend(bullets(&risk.flags));
    lines.push(String::new());
    lines.push("Checklist:".to_string());
    lines.extend(bullets(&risk.checklist));
    lines
}

pub fn swap_lines(quote: &SwapQuote) -> Vec<String> {
    let result = &quote.result;
    vec![
        format!("Amount out: {}", result.amount_out.round_dp(6)),
        format!(
            "New reserves: X={} Y={}",
            result.new_reserve_x.round_dp(6),
            result.new_reserve_y.round_dp(6)
        ),
        format!("Price impact: {}%", result.price_impact_pct.round_dp(4)),
    ]
}
