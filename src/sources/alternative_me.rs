//! alternative.me Fear & Greed Index client.
//!
//! API docs: https://alternative.me/crypto/fear-and-greed-index/
//! Endpoint: https://api.alternative.me/fng/?limit=1
//! Auth: none. The index value arrives as a string, not a number.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::SentimentSource;
use crate::types::{FearGreed, SourceError};

const URL: &str = "https://api.alternative.me/fng/?limit=1";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    /// Stringly-typed index value, e.g. `"39"`.
    value: String,
    /// Classification label, e.g. `"Fear"`.
    value_classification: String,
}

impl FngEntry {
    /// Validate and convert into the domain type. The published index is
    /// bounded to 0–100; anything else is a malformed response.
    fn to_fear_greed(&self) -> Result<FearGreed, SourceError> {
        let value: u8 = self.value.parse().map_err(|_| {
            SourceError::Malformed(format!("index value is not an integer: {:?}", self.value))
        })?;
        if value > 100 {
            return Err(SourceError::Malformed(format!(
                "index value out of range: {value}"
            )));
        }
        Ok(FearGreed {
            value,
            label: self.value_classification.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Fear & Greed Index client.
pub struct AlternativeMeClient {
    http: Client,
}

impl AlternativeMeClient {
    pub fn new(timeout: std::time::Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("btcdash/0.1.0")
            .build()
            .context("Failed to build alternative.me HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl SentimentSource for AlternativeMeClient {
    async fn fear_and_greed(&self) -> Result<FearGreed, SourceError> {
        debug!(url = URL, "Fetching Fear & Greed Index");
        let resp = self.http.get(URL).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }
        let data: FngResponse = resp.json().await?;
        let entry = data
            .data
            .first()
            .ok_or_else(|| SourceError::Malformed("empty data list".to_string()))?;
        entry.to_fear_greed()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "name": "Fear and Greed Index",
            "data": [
                {
                    "value": "39",
                    "value_classification": "Fear",
                    "timestamp": "1754265600",
                    "time_until_update": "3600"
                }
            ]
        }"#;
        let parsed: FngResponse = serde_json::from_str(json).unwrap();
        let fg = parsed.data[0].to_fear_greed().unwrap();
        assert_eq!(fg.value, 39);
        assert_eq!(fg.label, "Fear");
    }

    #[test]
    fn test_parse_empty_data() {
        let json = r#"{"data":[]}"#;
        let parsed: FngResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let entry = FngEntry {
            value: "thirty-nine".to_string(),
            value_classification: "Fear".to_string(),
        };
        assert!(matches!(
            entry.to_fear_greed(),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let entry = FngEntry {
            value: "101".to_string(),
            value_classification: "Greed".to_string(),
        };
        assert!(matches!(
            entry.to_fear_greed(),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn test_boundary_values_accepted() {
        for raw in ["0", "100"] {
            let entry = FngEntry {
                value: raw.to_string(),
                value_classification: "Neutral".to_string(),
            };
            assert!(entry.to_fear_greed().is_ok());
        }
    }

    #[test]
    fn test_new_client() {
        let client = AlternativeMeClient::new(std::time::Duration::from_secs(3));
        assert!(client.is_ok());
    }
}
