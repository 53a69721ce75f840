//! HTTP client for the public `/info` endpoint.

use crate::error::{FeedError, FeedResult};
use crate::parser;
use hlmon_core::{FundingHistoryEntry, Liquidation, MarketStats};
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body for parameterless info queries.
#[derive(Debug, Serialize)]
struct InfoRequest {
    #[serde(rename = "type")]
    request_type: &'static str,
}

/// Request body for `fundingHistory`.
#[derive(Debug, Serialize)]
struct FundingHistoryRequest {
    #[serde(rename = "type")]
    request_type: &'static str,
    coin: String,
    /// Lookback horizon in hours.
    horizon: u32,
}

/// Request body for `liquidations`, optionally scoped to one coin.
#[derive(Debug, Serialize)]
struct LiquidationsRequest {
    #[serde(rename = "type")]
    request_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    coin: Option<String>,
}

/// Client for the exchange's public market-data endpoint.
pub struct InfoClient {
    client: Client,
    info_url: String,
}

impl InfoClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - API base (e.g., "https://api.hyperliquid.xyz");
    ///   `/info` is appended.
    pub fn new(base_url: impl Into<String>) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| FeedError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        let base = base_url.into();
        Ok(Self {
            client,
            info_url: format!("{}/info", base.trim_end_matches('/')),
        })
    }

    /// Fetch statistics for every perpetual market in one call.
    ///
    /// Uses `{"type": "metaAndAssetCtxs"}`. Returns an error on any
    /// transport, status, or structural parse failure; callers decide
    /// how to degrade.
    pub async fn market_stats(&self) -> FeedResult<HashMap<String, MarketStats>> {
        let body = self
            .post(&InfoRequest {
                request_type: "metaAndAssetCtxs",
            })
            .await?;
        let markets = parser::parse_market_stats(&body)?;
        debug!(market_count = markets.len(), "Fetched market stats");
        Ok(markets)
    }

    /// Fetch funding history for one coin over a lookback horizon (hours).
    pub async fn funding_history(
        &self,
        coin: &str,
        horizon_hours: u32,
    ) -> FeedResult<Vec<FundingHistoryEntry>> {
        let body = self
            .post(&FundingHistoryRequest {
                request_type: "fundingHistory",
                coin: coin.to_string(),
                horizon: horizon_hours,
            })
            .await?;
        parser::parse_funding_history(&body)
    }

    /// Fetch recent liquidations, optionally scoped to one coin.
    pub async fn liquidations(&self, coin: Option<&str>) -> FeedResult<Vec<Liquidation>> {
        let body = self
            .post(&LiquidationsRequest {
                request_type: "liquidations",
                coin: coin.map(|c| c.to_string()),
            })
            .await?;
        parser::parse_liquidations(&body)
    }

    async fn post<T: Serialize>(&self, request: &T) -> FeedResult<serde_json::Value> {
        let response = self
            .client
            .post(&self.info_url)
            .json(request)
            .send()
            .await
            .map_err(|e| FeedError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::HttpClient(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| FeedError::Parse(format!("Failed to parse response body: {e}")))
    }
}
