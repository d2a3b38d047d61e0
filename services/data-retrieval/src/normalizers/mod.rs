// Normalization of raw provider payloads into canonical records
use crate::types::*;
use serde_json::Value;

/// Aggregator chain ids for the short hints users type
static CHAIN_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "sol" => "solana",
    "solana" => "solana",
    "eth" => "ethereum",
    "ethereum" => "ethereum",
    "bsc" => "bsc",
    "bnb" => "bsc",
    "base" => "base",
    "arb" => "arbitrum",
    "arbitrum" => "arbitrum",
    "matic" => "polygon",
    "polygon" => "polygon",
    "avax" => "avalanche",
    "avalanche" => "avalanche",
};

/// First pair of the provider's result list, normalized
///
/// The provider's relevance ranking is trusted: no re-ranking by liquidity
/// or chain. An empty or missing list means "no snapshot".
pub fn normalize_dex_response(response: &DexResponse) -> Option<MarketSnapshot> {
    response
        .pairs
        .as_deref()
        .and_then(|pairs| pairs.first())
        .map(normalize_pair)
}

pub fn normalize_pair(pair: &DexPair) -> MarketSnapshot {
    let token = pair.base_token.as_ref();

    MarketSnapshot {
        name: text_or(token.and_then(|t| t.name.as_deref()), "Unknown"),
        symbol: text_or(token.and_then(|t| t.symbol.as_deref()), "Unknown"),
        chain: text_or(pair.chain_id.as_deref(), "unknown"),
        dex: text_or(pair.dex_id.as_deref(), "unknown"),
        price_usd: price_text(pair.price_usd.as_ref()),
        liquidity_usd: coerce_amount(pair.liquidity.as_ref().and_then(|l| l.usd.as_ref())),
        volume_24h: coerce_amount(pair.volume.as_ref().and_then(|v| v.h24.as_ref())),
        fdv: coerce_amount(pair.fdv.as_ref()),
        pair_address: text_or(pair.pair_address.as_deref(), ""),
        url: text_or(pair.url.as_deref(), ""),
    }
}

/// Map a user chain hint ("sol", "ETH", ...) to an aggregator chain id
///
/// Unknown hints pass through lowercased; blank hints are `None`.
pub fn normalize_chain_hint(hint: &str) -> Option<String> {
    let hint = hint.trim().to_lowercase();
    if hint.is_empty() {
        return None;
    }
    Some(
        CHAIN_ALIASES
            .get(hint.as_str())
            .map(|id| id.to_string())
            .unwrap_or(hint),
    )
}

fn text_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

fn price_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "N/A".to_string(),
    }
}

/// Non-negative USD amount; anything missing or non-numeric becomes 0
fn coerce_amount(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(x) if x.is_finite() && x > 0.0 => x,
        _ => 0.0,
    }
}
