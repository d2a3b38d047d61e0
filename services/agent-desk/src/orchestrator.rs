//! Query orchestration: cache → fetch → normalize → rule engine → refine → compose
//!
//! One [`Orchestrator`] lives for the whole server or CLI session and owns the
//! shared response cache. Every query runs its own independent pipeline.

use data_retrieval::{
    normalize_chain_hint, normalize_dex_response, ChainDataSource, CoinGeckoClient,
    DexDataSource, DexScreenerClient, MarketSnapshot, PriceIndexSource, SolBalance,
    SolanaRpcClient, SourceHealth, TtlCache,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::brain::{self, AgentVerdict};
use crate::config::Settings;
use crate::error::AgentError;
use crate::llm::{self, LlmCapability};
use crate::observability::{metrics, MetricsCollector, MetricsSnapshot};

use data_retrieval::sources::coingecko::DEFAULT_COIN_IDS;

/// Solana public keys are 32 raw bytes
const PUBKEY_LEN: usize = 32;

/// Upstream capabilities the orchestrator pulls from
#[derive(Clone)]
pub struct Sources {
    pub dex: Arc<dyn DexDataSource>,
    pub chain: Arc<dyn ChainDataSource>,
    pub prices: Arc<dyn PriceIndexSource>,
}

/// Which path produced the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Accepted LLM refinement
    Ai,
    /// Rule engine
    Fallback,
}

/// Result of one advisory query
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub query: String,
    pub chain: Option<String>,
    pub snapshot: Option<MarketSnapshot>,
    pub verdict: AgentVerdict,
    pub mode: AnalysisMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub mode: String,
    pub sources: Vec<SourceHealth>,
    pub counters: MetricsSnapshot,
}

pub struct Orchestrator {
    sources: Sources,
    llm: LlmCapability,
    cache: Arc<TtlCache<Value>>,
    ttl: Duration,
    tx_limit: usize,
    metrics: MetricsCollector,
}

impl Orchestrator {
    pub fn new(
        sources: Sources,
        llm: LlmCapability,
        cache: Arc<TtlCache<Value>>,
        ttl: Duration,
    ) -> Self {
        Self {
            sources,
            llm,
            cache,
            ttl,
            tx_limit: 10,
            metrics: MetricsCollector::new(),
        }
    }

    pub fn with_tx_limit(mut self, tx_limit: usize) -> Self {
        self.tx_limit = tx_limit;
        self
    }

    /// Real HTTP clients wired from configuration
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let sources = Sources {
            dex: Arc::new(DexScreenerClient::with_base_url(&settings.dexscreener_base)?),
            chain: Arc::new(SolanaRpcClient::new(&settings.sol_rpc)?),
            prices: Arc::new(CoinGeckoClient::with_base_url(
                &settings.coingecko_base,
                settings.coingecko_api_key(),
            )?),
        };
        let llm = LlmCapability::groq(
            &settings.groq_api_key,
            &settings.groq_model,
            &settings.groq_base,
        )?;

        Ok(Self::new(sources, llm, Arc::new(TtlCache::new()), settings.cache_ttl())
            .with_tx_limit(settings.tx_limit))
    }

    pub fn llm(&self) -> &LlmCapability {
        &self.llm
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Normalized snapshot for a token query, `None` when no pair matched
    pub async fn snapshot(&self, query: &str) -> Result<Option<MarketSnapshot>, AgentError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AgentError::InvalidInput("Missing q".to_string()));
        }

        let dex = self.sources.dex.clone();
        let owned = query.to_string();
        self.cached(format!("dex:{}", query), move || async move {
            let raw = dex.fetch_pairs(&owned).await?;
            Ok(normalize_dex_response(&raw))
        })
        .await
    }

    /// Full advisory pipeline for one query
    #[instrument(skip(self), fields(mode))]
    pub async fn run_query(
        &self,
        chain_hint: Option<&str>,
        query: &str,
    ) -> Result<QueryOutcome, AgentError> {
        self.metrics.increment(metrics::QUERIES, 1).await;
        let chain = chain_hint.and_then(normalize_chain_hint);

        let snapshot = match self.snapshot(query).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if matches!(e, AgentError::UpstreamUnavailable(_)) {
                    self.metrics.increment(metrics::UPSTREAM_ERRORS, 1).await;
                }
                return Err(e);
            }
        };

        let (verdict, mode) = match &snapshot {
            None => {
                self.metrics.increment(metrics::NO_DATA, 1).await;
                (brain::evaluate(None), AnalysisMode::Fallback)
            }
            Some(found) => self.verdict_for(found, query.trim(), chain.as_deref()).await,
        };

        tracing::Span::current().record("mode", tracing::field::debug(&mode));
        info!(
            query = query.trim(),
            signal = %verdict.signal.signal,
            status = %verdict.risk.status,
            "analysis complete"
        );

        Ok(QueryOutcome {
            query: query.trim().to_string(),
            chain,
            snapshot,
            verdict,
            mode,
        })
    }

    async fn verdict_for(
        &self,
        snapshot: &MarketSnapshot,
        query: &str,
        chain: Option<&str>,
    ) -> (AgentVerdict, AnalysisMode) {
        if !self.llm.is_configured() {
            return (brain::evaluate(Some(snapshot)), AnalysisMode::Fallback);
        }

        match llm::refine(&self.llm, snapshot, query, chain).await {
            Some(refined) => {
                self.metrics.increment(metrics::REFINEMENT_ACCEPTED, 1).await;
                (refined, AnalysisMode::Ai)
            }
            None => {
                self.metrics.increment(metrics::REFINEMENT_FALLBACK, 1).await;
                (brain::evaluate(Some(snapshot)), AnalysisMode::Fallback)
            }
        }
    }

    pub async fn balance(&self, pubkey: &str) -> Result<SolBalance, AgentError> {
        let pubkey = validate_pubkey(pubkey)?;
        let chain = self.sources.chain.clone();
        let owned = pubkey.to_string();
        // Only the integer lamports go through the JSON cache
        let lamports: u64 = self
            .cached(format!("bal:{}", pubkey), move || async move {
                Ok(chain.get_balance(&owned).await?.lamports)
            })
            .await?;
        Ok(SolBalance::from_lamports(lamports))
    }

    /// Most recent signatures, at most the configured limit
    pub async fn signatures(&self, pubkey: &str) -> Result<Vec<Value>, AgentError> {
        let pubkey = validate_pubkey(pubkey)?;
        let chain = self.sources.chain.clone();
        let owned = pubkey.to_string();
        let limit = self.tx_limit;
        self.cached(format!("tx:{}", pubkey), move || async move {
            Ok(chain.get_signatures(&owned, limit).await?)
        })
        .await
    }

    /// USD spot prices for the default coin set
    pub async fn prices(&self) -> Result<Value, AgentError> {
        let prices = self.sources.prices.clone();
        self.cached("prices".to_string(), move || async move {
            Ok(prices.get_simple_prices(&DEFAULT_COIN_IDS, "usd").await?)
        })
        .await
    }

    pub async fn health(&self) -> HealthReport {
        HealthReport {
            mode: self.llm.describe(),
            sources: vec![
                self.sources.dex.health().await,
                self.sources.chain.health().await,
                self.sources.prices.health().await,
            ],
            counters: self.metrics.snapshot().await,
        }
    }

    /// Typed view over the shared JSON cache
    async fn cached<T, F, Fut>(&self, key: String, producer: F) -> Result<T, AgentError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AgentError>>,
    {
        let value = self
            .cache
            .get_or_compute(&key, self.ttl, move || async move {
                let fresh = producer().await?;
                serde_json::to_value(fresh).map_err(|e| AgentError::Internal(e.to_string()))
            })
            .await?;

        debug!(key = %key, "cache served");
        serde_json::from_value(value).map_err(|e| AgentError::Internal(e.to_string()))
    }
}

/// Trimmed pubkey if it decodes to 32 bytes of base58
pub fn validate_pubkey(pubkey: &str) -> Result<&str, AgentError> {
    let pubkey = pubkey.trim();
    if pubkey.is_empty() {
        return Err(AgentError::InvalidInput("Missing pubkey".to_string()));
    }

    match bs58::decode(pubkey).into_vec() {
        Ok(bytes) if bytes.len() == PUBKEY_LEN => Ok(pubkey),
        _ => Err(AgentError::InvalidInput("Invalid pubkey".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pubkey() {
        let system_program = "11111111111111111111111111111111";
        assert_eq!(validate_pubkey(system_program).unwrap(), system_program);
        assert_eq!(
            validate_pubkey("  So11111111111111111111111111111111111111112 ").unwrap(),
            "So11111111111111111111111111111111111111112"
        );

        assert_eq!(validate_pubkey("   ").unwrap_err().to_string(), "Missing pubkey");
        assert_eq!(validate_pubkey("0OIl").unwrap_err().to_string(), "Invalid pubkey");
        assert_eq!(validate_pubkey("abc").unwrap_err().to_string(), "Invalid pubkey");
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(AnalysisMode::Ai).unwrap(), "ai");
        assert_eq!(serde_json::to_value(AnalysisMode::Fallback).unwrap(), "fallback");
    }
}
