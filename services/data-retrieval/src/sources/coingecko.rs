use crate::sources::health::HealthTracker;
use crate::types::*;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

pub const COINGECKO_BASE: &str = "https://api.coingecko.com/api/v3";

/// Coins shown on the dashboard ticker
pub const DEFAULT_COIN_IDS: [&str; 3] = ["bitcoin", "ethereum", "solana"];

/// CoinGecko API client
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: tokio::sync::Semaphore,
    last_request: tokio::sync::Mutex<Instant>,
    health_tracker: HealthTracker,
}

impl CoinGeckoClient {
    /// Free tier: ~10-30 calls/minute
    /// Pro tier: higher limits with API key
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(COINGECKO_BASE, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| DataRetrievalError::ApiError(e.to_string()))?;

        // Free tier: 1 concurrent request to stay under the rate limit
        let permits = if api_key.is_some() { 5 } else { 1 };

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            rate_limiter: tokio::sync::Semaphore::new(permits),
            last_request: tokio::sync::Mutex::new(Instant::now() - Duration::from_secs(10)),
            health_tracker: HealthTracker::new(),
        })
    }

    const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Minimum spacing between consecutive requests
    const MIN_REQUEST_GAP: Duration = Duration::from_millis(100);

    /// Rate-limited GET returning raw JSON; 429 is reported, not retried
    async fn rate_limited_get(&self, url: Url) -> Result<serde_json::Value> {
        let _permit = self
            .rate_limiter
            .acquire()
            .await
            .map_err(|e| DataRetrievalError::ApiError(e.to_string()))?;

        {
            let mut last = self.last_request.lock().await;
            let elapsed = last.elapsed();
            if elapsed < Self::MIN_REQUEST_GAP {
                tokio::time::sleep(Self::MIN_REQUEST_GAP - elapsed).await;
            }
            *last = Instant::now();
        }

        let started = Instant::now();
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-pro-api-key", key);
        }

        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                self.health_tracker.record_failure(&e.to_string());
                return Err(DataRetrievalError::ApiError(e.to_string()));
            }
        };

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            tracing::warn!("CoinGecko rate limited (retry after {:?}s)", retry_after);
            self.health_tracker.record_failure("rate limited");
            return Err(DataRetrievalError::RateLimit {
                source_name: "coingecko".to_string(),
                retry_after,
            });
        }

        if !status.is_success() {
            let message = format!("CoinGecko {}", status.as_u16());
            self.health_tracker.record_failure(&message);
            return Err(DataRetrievalError::ApiError(message));
        }

        let body = response.json::<serde_json::Value>().await.map_err(|e| {
            self.health_tracker.record_failure(&e.to_string());
            DataRetrievalError::InvalidResponse(e.to_string())
        })?;

        self.health_tracker
            .record_success(started.elapsed().as_millis() as u64);
        Ok(body)
    }

    /// `/simple/price` for the given coin ids, with 24h change
    ///
    /// Returned as-is: `{"bitcoin": {"usd": 1.0, "usd_24h_change": -0.4}, ...}`
    pub async fn get_simple_prices(
        &self,
        ids: &[&str],
        vs_currency: &str,
    ) -> Result<serde_json::Value> {
        let mut url = Url::parse(&format!("{}/simple/price", self.base_url))
            .map_err(|e| DataRetrievalError::ApiError(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("ids", &ids.join(","))
            .append_pair("vs_currencies", &vs_currency.to_lowercase())
            .append_pair("include_24hr_change", "true");

        self.rate_limited_get(url).await
    }

    /// Get health status using internal metrics (no API call)
    pub fn health(&self) -> SourceHealth {
        self.health_tracker.snapshot("coingecko")
    }
}

#[async_trait::async_trait]
impl PriceIndexSource for CoinGeckoClient {
    async fn get_simple_prices(
        &self,
        ids: &[&str],
        vs_currency: &str,
    ) -> Result<serde_json::Value> {
        CoinGeckoClient::get_simple_prices(self, ids, vs_currency).await
    }

    async fn health(&self) -> SourceHealth {
        CoinGeckoClient::health(self)
    }

    fn name(&self) -> &str {
        "coingecko"
    }
}
