use crate::sources::health::HealthTracker;
use crate::types::*;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::debug;

pub const SOLANA_MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Minimal Solana JSON-RPC client (balance and signature history only)
pub struct SolanaRpcClient {
    client: Client,
    rpc_url: String,
    health_tracker: HealthTracker,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

impl SolanaRpcClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| DataRetrievalError::ApiError(e.to_string()))?;

        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
            health_tracker: HealthTracker::new(),
        })
    }

    /// Single JSON-RPC 2.0 call
    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!(method, "Solana RPC call");
        let started = Instant::now();

        let response = match self.client.post(&self.rpc_url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                self.health_tracker.record_failure(&e.to_string());
                return Err(DataRetrievalError::ApiError(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = format!("RPC {}: {}", status.as_u16(), text);
            self.health_tracker.record_failure(&message);
            return Err(DataRetrievalError::Rpc(message));
        }

        let envelope: RpcEnvelope<T> = response.json().await.map_err(|e| {
            self.health_tracker.record_failure(&e.to_string());
            DataRetrievalError::InvalidResponse(e.to_string())
        })?;

        if let Some(err) = envelope.error {
            let message = err.message.unwrap_or_else(|| "RPC error".to_string());
            self.health_tracker.record_failure(&message);
            return Err(DataRetrievalError::Rpc(message));
        }

        let result = envelope.result.ok_or_else(|| {
            self.health_tracker.record_failure("missing result");
            DataRetrievalError::InvalidResponse(format!("{} returned no result", method))
        })?;

        self.health_tracker
            .record_success(started.elapsed().as_millis() as u64);
        Ok(result)
    }

    pub async fn get_balance(&self, pubkey: &str) -> Result<SolBalance> {
        let balance: BalanceResult = self
            .call("getBalance", json!([pubkey, { "commitment": "confirmed" }]))
            .await?;

        Ok(SolBalance::from_lamports(balance.value))
    }

    pub async fn get_signatures(&self, pubkey: &str, limit: usize) -> Result<Vec<Value>> {
        self.call("getSignaturesForAddress", json!([pubkey, { "limit": limit }]))
            .await
    }

    pub fn health(&self) -> SourceHealth {
        self.health_tracker.snapshot("solana_rpc")
    }
}

#[async_trait::async_trait]
impl ChainDataSource for SolanaRpcClient {
    async fn get_balance(&self, pubkey: &str) -> Result<SolBalance> {
        SolanaRpcClient::get_balance(self, pubkey).await
    }

    async fn get_signatures(&self, pubkey: &str, limit: usize) -> Result<Vec<Value>> {
        SolanaRpcClient::get_signatures(self, pubkey, limit).await
    }

    async fn health(&self) -> SourceHealth {
        SolanaRpcClient::health(self)
    }

    fn name(&self) -> &str {
        "solana_rpc"
    }
}
