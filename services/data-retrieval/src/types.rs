use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw Dexscreener payload shared by `/latest/dex/search` and `/latest/dex/tokens/{address}`
///
/// `pairs` is `null` (or missing) when nothing matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

/// One pair as reported by the aggregator
///
/// Numeric fields stay as raw JSON values; the aggregator mixes numbers and
/// numeric strings between endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub url: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<DexToken>,
    pub price_usd: Option<serde_json::Value>,
    pub liquidity: Option<DexLiquidity>,
    pub volume: Option<DexVolume>,
    pub fdv: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexToken {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexLiquidity {
    pub usd: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DexVolume {
    pub h24: Option<serde_json::Value>,
}

/// Canonical point-in-time view of one token/pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub name: String,
    pub symbol: String,
    pub chain: String,
    pub dex: String,
    /// Kept as the provider's decimal string to avoid float loss
    pub price_usd: String,
    pub liquidity_usd: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    pub fdv: f64,
    pub pair_address: String,
    pub url: String,
}

/// Native SOL balance of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolBalance {
    pub lamports: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub sol: Decimal,
}

impl SolBalance {
    /// Exact lamports / 1e9
    pub fn from_lamports(lamports: u64) -> Self {
        Self {
            lamports,
            sol: Decimal::from(lamports)
                / Decimal::from(crate::sources::solana_rpc::LAMPORTS_PER_SOL),
        }
    }
}

/// Data source health/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceHealth {
    pub source: String,
    pub is_healthy: bool,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub success_rate: f64,
    pub avg_latency_ms: u64,
}

/// Error types for data retrieval
#[derive(Debug, thiserror::Error)]
pub enum DataRetrievalError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded for {source_name}")]
    RateLimit {
        source_name: String,
        retry_after: Option<u64>,
    },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Rpc(String),
}

/// Result type for data retrieval operations
pub type Result<T> = std::result::Result<T, DataRetrievalError>;

/// Decentralized-exchange aggregator lookups
#[async_trait::async_trait]
pub trait DexDataSource: Send + Sync {
    /// Raw pair list for a symbol, name or contract address
    async fn fetch_pairs(&self, query: &str) -> Result<DexResponse>;

    async fn health(&self) -> SourceHealth;

    fn name(&self) -> &str;
}

/// Blockchain RPC passthroughs
#[async_trait::async_trait]
pub trait ChainDataSource: Send + Sync {
    async fn get_balance(&self, pubkey: &str) -> Result<SolBalance>;

    /// Most recent transaction signatures, newest first
    async fn get_signatures(&self, pubkey: &str, limit: usize) -> Result<Vec<serde_json::Value>>;

    async fn health(&self) -> SourceHealth;

    fn name(&self) -> &str;
}

/// Centralized price index
#[async_trait::async_trait]
pub trait PriceIndexSource: Send + Sync {
    /// Spot prices keyed by provider coin id, including 24h change
    async fn get_simple_prices(&self, ids: &[&str], vs_currency: &str)
        -> Result<serde_json::Value>;

    async fn health(&self) -> SourceHealth;

    fn name(&self) -> &str;
}
