//! mempool.space recommended-fees client.
//!
//! API docs: https://mempool.space/docs/api/rest
//! Endpoint: https://mempool.space/api/v1/fees/recommended
//! Auth: none. Fee rates are integers in sat/vB, keyed camelCase.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::FeeSource;
use crate::types::{FeeEstimates, SourceError};

const URL: &str = "https://mempool.space/api/v1/fees/recommended";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendedFeesResponse {
    fastest_fee: u64,
    half_hour_fee: u64,
    hour_fee: u64,
}

impl From<RecommendedFeesResponse> for FeeEstimates {
    fn from(resp: RecommendedFeesResponse) -> Self {
        FeeEstimates {
            fastest: resp.fastest_fee,
            half_hour: resp.half_hour_fee,
            hour: resp.hour_fee,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Recommended transfer-fee client.
pub struct MempoolSpaceClient {
    http: Client,
}

impl MempoolSpaceClient {
    pub fn new(timeout: std::time::Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("btcdash/0.1.0")
            .build()
            .context("Failed to build mempool.space HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl FeeSource for MempoolSpaceClient {
    async fn recommended_fees(&self) -> Result<FeeEstimates, SourceError> {
        debug!(url = URL, "Fetching recommended fees");
        let resp = self.http.get(URL).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }
        let data: RecommendedFeesResponse = resp.json().await?;
        Ok(data.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommended_fees() {
        let json = r#"{
            "fastestFee": 12,
            "halfHourFee": 8,
            "hourFee": 5,
            "economyFee": 3,
            "minimumFee": 1
        }"#;
        let parsed: RecommendedFeesResponse = serde_json::from_str(json).unwrap();
        let fees: FeeEstimates = parsed.into();
        assert_eq!(fees.fastest, 12);
        assert_eq!(fees.half_hour, 8);
        assert_eq!(fees.hour, 5);
    }

    #[test]
    fn test_missing_tier_rejected() {
        let json = r#"{"fastestFee": 12, "hourFee": 5}"#;
        assert!(serde_json::from_str::<RecommendedFeesResponse>(json).is_err());
    }

    #[test]
    fn test_new_client() {
        let client = MempoolSpaceClient::new(std::time::Duration::from_secs(3));
        assert!(client.is_ok());
    }
}
