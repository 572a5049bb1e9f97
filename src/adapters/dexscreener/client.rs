//! DexScreener API Client
//!
//! Pure I/O against the DexScreener read endpoints. Every failure mode
//! (transport, non-200, undecodable body) maps to a typed [`MarketDataError`];
//! the polling loop treats any of them as "no data this cycle". No retries
//! and no backoff here, the fixed polling interval is the retry mechanism.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::feeds::{BoostedTokenRef, TokenProfile};
use crate::domain::snapshot::PoolSnapshot;

/// Request timeout; generous because the public API throttles under load
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Errors from the market-data endpoints
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint {url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// The three feed URLs; paths are configuration, shapes are contract
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedEndpoints {
    /// Latest token profiles feed
    pub latest_url: String,
    /// Boosted tokens feed
    pub boosted_url: String,
    /// Pool lookup base; `{chain}/{address}` is appended
    pub pools_url: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            latest_url: "https://api.dexscreener.com/token-profiles/latest/v1".to_string(),
            boosted_url: "https://api.dexscreener.com/token-boosts/latest/v1".to_string(),
            pools_url: "https://api.dexscreener.com/token-pairs/v1".to_string(),
        }
    }
}

/// Pool lookups arrive either as a bare array or wrapped under `pairs`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PoolsDocument {
    Wrapped { pairs: Option<Vec<PoolSnapshot>> },
    Bare(Vec<PoolSnapshot>),
}

impl PoolsDocument {
    fn into_pools(self) -> Vec<PoolSnapshot> {
        match self {
            PoolsDocument::Wrapped { pairs } => pairs.unwrap_or_default(),
            PoolsDocument::Bare(pools) => pools,
        }
    }
}

/// DexScreener read client
#[derive(Debug, Clone)]
pub struct DexClient {
    endpoints: FeedEndpoints,
    http: Client,
}

impl DexClient {
    /// Create a client against the given endpoints.
    pub fn new(endpoints: FeedEndpoints) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { endpoints, http })
    }

    pub fn endpoints(&self) -> &FeedEndpoints {
        &self.endpoints
    }

    /// Fetch the latest-listings feed.
    pub async fn latest_profiles(&self) -> Result<Vec<TokenProfile>, MarketDataError> {
        self.fetch_json(&self.endpoints.latest_url).await
    }

    /// Fetch the boosted-tokens feed.
    pub async fn boosted_tokens(&self) -> Result<Vec<BoostedTokenRef>, MarketDataError> {
        self.fetch_json(&self.endpoints.boosted_url).await
    }

    /// Fetch all known pools for one (chain, token address) pair.
    pub async fn token_pools(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<PoolSnapshot>, MarketDataError> {
        let url = self.pool_lookup_url(chain_id, token_address);
        let document: PoolsDocument = self.fetch_json(&url).await?;
        Ok(document.into_pools())
    }

    fn pool_lookup_url(&self, chain_id: &str, token_address: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoints.pools_url.trim_end_matches('/'),
            chain_id,
            token_address
        )
    }

    /// GET a URL and decode its JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MarketDataError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| MarketDataError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
