//! Service configuration
//!
//! Defaults, then environment variables (`PORT`, `SOL_RPC`, `REFRESH_TTL_MS`,
//! `GROQ_API_KEY`, ...). Binaries load a `.env` file first.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

use data_retrieval::sources::{
    coingecko::COINGECKO_BASE, dexscreener::DEXSCREENER_BASE, solana_rpc::SOLANA_MAINNET_RPC,
};

use crate::llm::groq::{DEFAULT_GROQ_MODEL, GROQ_BASE};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_host: String,
    pub port: u16,
    pub sol_rpc: String,
    /// Shared cache TTL for every upstream lookup
    pub refresh_ttl_ms: u64,
    /// Signatures returned by `/api/sol/tx`
    pub tx_limit: usize,
    /// Empty = LLM not configured
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_base: String,
    pub dexscreener_base: String,
    pub coingecko_base: String,
    pub coingecko_api_key: String,
    pub static_dir: String,
    pub log_level: String,
}

impl Settings {
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("bind_host", "0.0.0.0")?
            .set_default("port", 8788_i64)?
            .set_default("sol_rpc", SOLANA_MAINNET_RPC)?
            .set_default("refresh_ttl_ms", 15_000_i64)?
            .set_default("tx_limit", 10_i64)?
            .set_default("groq_api_key", "")?
            .set_default("groq_model", DEFAULT_GROQ_MODEL)?
            .set_default("groq_base", GROQ_BASE)?
            .set_default("dexscreener_base", DEXSCREENER_BASE)?
            .set_default("coingecko_base", COINGECKO_BASE)?
            .set_default("coingecko_api_key", "")?
            .set_default("static_dir", "public")?
            .set_default("log_level", "info")
    }

    /// Defaults overridden by the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(Self::defaults()?.add_source(Environment::default().try_parsing(true)))
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    /// Apply command-line flags; `None` keeps the configured value
    pub fn with_overrides(mut self, refresh_ttl_ms: Option<u64>, log_level: Option<String>) -> Self {
        if let Some(ttl_ms) = refresh_ttl_ms {
            self.refresh_ttl_ms = ttl_ms;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.refresh_ttl_ms)
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn coingecko_api_key(&self) -> Option<String> {
        Some(self.coingecko_api_key.trim().to_string()).filter(|k| !k.is_empty())
    }
}
