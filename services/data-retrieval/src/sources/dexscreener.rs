use crate::sources::health::HealthTracker;
use crate::types::*;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

pub const DEXSCREENER_BASE: &str = "https://api.dexscreener.com";

/// Queries longer than this are treated as contract addresses
const ADDRESS_MIN_LEN: usize = 31;

/// Lookup route chosen for a user query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DexQuery {
    /// Direct token lookup: `/latest/dex/tokens/{address}`
    Address(String),
    /// Free-text search: `/latest/dex/search?q=`
    Search(String),
}

impl DexQuery {
    pub fn classify(query: &str) -> Self {
        let query = query.trim();
        if query.starts_with("0x") || query.chars().count() >= ADDRESS_MIN_LEN {
            DexQuery::Address(query.to_string())
        } else {
            DexQuery::Search(query.to_string())
        }
    }
}

/// Dexscreener REST client
pub struct DexScreenerClient {
    client: Client,
    base_url: Url,
    health_tracker: HealthTracker,
}

impl DexScreenerClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEXSCREENER_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DataRetrievalError::ApiError(format!("Invalid Dexscreener URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DataRetrievalError::ApiError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            health_tracker: HealthTracker::new(),
        })
    }

    /// Full request URL for a classified query
    pub fn endpoint(&self, query: &DexQuery) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DataRetrievalError::ApiError("Dexscreener URL cannot be a base".to_string()))?;
            segments.pop_if_empty().extend(["latest", "dex"]);
            match query {
                DexQuery::Address(address) => {
                    segments.extend(["tokens", address.as_str()]);
                }
                DexQuery::Search(_) => {
                    segments.push("search");
                }
            }
        }
        if let DexQuery::Search(text) = query {
            url.query_pairs_mut().append_pair("q", text);
        }
        Ok(url)
    }

    pub async fn fetch_pairs(&self, query: &str) -> Result<DexResponse> {
        let url = self.endpoint(&DexQuery::classify(query))?;
        debug!("Fetching Dexscreener pairs from {}", url);

        let started = Instant::now();
        let response = match self.client.get(url).send().await {
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
            warn!("Dexscreener rate limited (retry after {:?}s)", retry_after);
            self.health_tracker.record_failure("rate limited");
            return Err(DataRetrievalError::RateLimit {
                source_name: "dexscreener".to_string(),
                retry_after,
            });
        }

        if !status.is_success() {
            let message = format!("Dexscreener {}", status.as_u16());
            self.health_tracker.record_failure(&message);
            return Err(DataRetrievalError::ApiError(message));
        }

        let parsed = response.json::<DexResponse>().await.map_err(|e| {
            self.health_tracker.record_failure(&e.to_string());
            DataRetrievalError::InvalidResponse(e.to_string())
        })?;

        self.health_tracker
            .record_success(started.elapsed().as_millis() as u64);
        Ok(parsed)
    }

    pub fn health(&self) -> SourceHealth {
        self.health_tracker.snapshot("dexscreener")
    }
}

#[async_trait::async_trait]
impl DexDataSource for DexScreenerClient {
    async fn fetch_pairs(&self, query: &str) -> Result<DexResponse> {
        DexScreenerClient::fetch_pairs(self, query).await
    }

    async fn health(&self) -> SourceHealth {
        DexScreenerClient::health(self)
    }

    fn name(&self) -> &str {
        "dexscreener"
    }
}
