//! Stub upstreams shared by the integration suites

#![allow(dead_code)]

use agent_desk::llm::{JsonCompleter, LlmCapability, LlmError};
use agent_desk::{Orchestrator, Sources};
use data_retrieval::{
    ChainDataSource, DataRetrievalError, DexDataSource, DexResponse, PriceIndexSource, Result,
    SolBalance, SourceHealth, TtlCache,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const WALLET: &str = "So11111111111111111111111111111111111111112";

fn health(source: &str) -> SourceHealth {
    SourceHealth {
        source: source.to_string(),
        is_healthy: true,
        last_success: None,
        last_error: None,
        success_rate: 1.0,
        avg_latency_ms: 0,
    }
}

/// Raw aggregator payload with a single pair
pub fn pair_payload(liquidity_usd: f64, volume_24h: f64) -> Value {
    json!({
        "pairs": [{
            "chainId": "solana",
            "dexId": "raydium",
            "url": "https://dexscreener.com/solana/pair",
            "pairAddress": "pair",
            "baseToken": { "address": "mint", "name": "Bonk", "symbol": "BONK" },
            "priceUsd": "0.00002",
            "liquidity": { "usd": liquidity_usd },
            "volume": { "h24": volume_24h },
            "fdv": 1_500_000_000.0
        }]
    })
}

/// Aggregator stub; `None` payload simulates an upstream outage
pub struct StubDex {
    payload: Option<Value>,
    pub calls: AtomicUsize,
}

impl StubDex {
    pub fn returning(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            payload: Some(payload),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            payload: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DexDataSource for StubDex {
    async fn fetch_pairs(&self, _query: &str) -> Result<DexResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.payload {
            Some(payload) => serde_json::from_value(payload.clone())
                .map_err(|e| DataRetrievalError::InvalidResponse(e.to_string())),
            None => Err(DataRetrievalError::ApiError("Dexscreener 503".to_string())),
        }
    }

    async fn health(&self) -> SourceHealth {
        health("dexscreener")
    }

    fn name(&self) -> &str {
        "dexscreener"
    }
}

pub struct StubChain {
    pub calls: AtomicUsize,
    pub lamports: u64,
}

impl Default for StubChain {
    fn default() -> Self {
        Self::with_lamports(2_500_000_000)
    }
}

impl StubChain {
    pub fn with_lamports(lamports: u64) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            lamports,
        }
    }
}

#[async_trait::async_trait]
impl ChainDataSource for StubChain {
    async fn get_balance(&self, _pubkey: &str) -> Result<SolBalance> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SolBalance::from_lamports(self.lamports))
    }

    async fn get_signatures(&self, _pubkey: &str, limit: usize) -> Result<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((0..limit)
            .map(|i| json!({ "signature": format!("sig{}", i), "slot": 100 + i }))
            .collect())
    }

    async fn health(&self) -> SourceHealth {
        health("solana-rpc")
    }

    fn name(&self) -> &str {
        "solana-rpc"
    }
}

pub struct StubPrices;

#[async_trait::async_trait]
impl PriceIndexSource for StubPrices {
    async fn get_simple_prices(&self, ids: &[&str], _vs_currency: &str) -> Result<Value> {
        Ok(ids
            .iter()
            .map(|id| (id.to_string(), json!({ "usd": 1.0, "usd_24h_change": 0.5 })))
            .collect::<serde_json::Map<_, _>>()
            .into())
    }

    async fn health(&self) -> SourceHealth {
        health("coingecko")
    }

    fn name(&self) -> &str {
        "coingecko"
    }
}

/// Canned LLM reply; `None` simulates a transport failure
pub struct StubLlm {
    reply: Option<Value>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubLlm {
    pub fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl JsonCompleter for StubLlm {
    async fn complete_json(
        &self,
        _system: &str,
        user: &str,
    ) -> std::result::Result<Option<Value>, LlmError> {
        self.prompts.lock().unwrap().push(user.to_string());
        match &self.reply {
            Some(reply) => Ok(Some(reply.clone())),
            None => Err(LlmError::Http("connection refused".to_string())),
        }
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}

pub fn orchestrator(dex: Arc<StubDex>, llm: LlmCapability, ttl: Duration) -> Orchestrator {
    orchestrator_with_chain(dex, Arc::new(StubChain::default()), llm, ttl)
}

pub fn orchestrator_with_chain(
    dex: Arc<StubDex>,
    chain: Arc<StubChain>,
    llm: LlmCapability,
    ttl: Duration,
) -> Orchestrator {
    let sources = Sources {
        dex,
        chain,
        prices: Arc::new(StubPrices),
    };
    Orchestrator::new(sources, llm, Arc::new(TtlCache::new()), ttl).with_tx_limit(3)
}
