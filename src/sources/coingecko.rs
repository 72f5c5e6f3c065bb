//! CoinGecko market-data client.
//!
//! Covers the three price-series indicators: spot price, all-time high,
//! and the 200-day moving average (computed from the price range
//! endpoint, since CoinGecko has no MA endpoint of its own).
//!
//! API docs: https://docs.coingecko.com/reference/introduction
//! Base URL: https://api.coingecko.com/api/v3
//! Auth: none for the public endpoints used here.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::MarketDataSource;
use crate::types::SourceError;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Lookback window for the moving average, in days.
const MA_WINDOW_DAYS: i64 = 200;

// ---------------------------------------------------------------------------
// API response types (CoinGecko JSON → Rust)
// ---------------------------------------------------------------------------

/// Response from `/simple/price?ids=bitcoin&vs_currencies=usd`.
#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    bitcoin: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Decimal,
}

/// Response from `/coins/bitcoin`. Only the ATH field is kept.
#[derive(Debug, Deserialize)]
struct CoinInfoResponse {
    market_data: CoinMarketData,
}

#[derive(Debug, Deserialize)]
struct CoinMarketData {
    ath: UsdQuote,
}

/// Response from `/coins/bitcoin/market_chart/range`.
/// `prices` is a list of `[timestamp_ms, price]` pairs.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<(f64, Decimal)>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// CoinGecko client for the tracked asset's price series.
pub struct CoinGeckoClient {
    http: Client,
}

impl CoinGeckoClient {
    pub fn new(timeout: std::time::Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("btcdash/0.1.0")
            .build()
            .context("Failed to build CoinGecko HTTP client")?;
        Ok(Self { http })
    }

    /// GET a URL and deserialize its JSON body, collapsing any failure
    /// into a `SourceError`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        debug!(url, "Fetching from CoinGecko");
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }

    /// The `[from, to]` unix-second window covering the MA lookback.
    fn range_window(now: DateTime<Utc>) -> (i64, i64) {
        let end = now.timestamp();
        (end - MA_WINDOW_DAYS * 86_400, end)
    }

    /// Arithmetic mean of the price column, floored to whole USD.
    /// An empty series yields `None`.
    fn mean_price(prices: &[(f64, Decimal)]) -> Option<Decimal> {
        if prices.is_empty() {
            return None;
        }
        let sum: Decimal = prices.iter().map(|(_, price)| *price).sum();
        Some((sum / Decimal::from(prices.len() as u64)).floor())
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoClient {
    async fn spot_price(&self) -> Result<Decimal, SourceError> {
        let url = format!("{BASE_URL}/simple/price?ids=bitcoin&vs_currencies=usd");
        let data: SimplePriceResponse = self.get_json(&url).await?;
        Ok(data.bitcoin.usd)
    }

    async fn all_time_high(&self) -> Result<Decimal, SourceError> {
        let url = format!("{BASE_URL}/coins/bitcoin");
        let data: CoinInfoResponse = self.get_json(&url).await?;
        Ok(data.market_data.ath.usd)
    }

    async fn moving_average_200d(&self) -> Result<Decimal, SourceError> {
        let (from, to) = Self::range_window(Utc::now());
        let url = format!(
            "{BASE_URL}/coins/bitcoin/market_chart/range?vs_currency=usd&from={from}&to={to}"
        );
        let data: MarketChartResponse = self.get_json(&url).await?;
        Self::mean_price(&data.prices)
            .ok_or_else(|| SourceError::Malformed("empty price series".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_simple_price() {
        let json = r#"{"bitcoin":{"usd":64231.5}}"#;
        let parsed: SimplePriceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.bitcoin.usd, dec!(64231.5));
    }

    #[test]
    fn test_parse_simple_price_missing_field() {
        let json = r#"{"ethereum":{"usd":3000.0}}"#;
        assert!(serde_json::from_str::<SimplePriceResponse>(json).is_err());
    }

    #[test]
    fn test_parse_coin_info_ath() {
        // Unknown fields (the real response carries hundreds) are ignored.
        let json = r#"{
            "id": "bitcoin",
            "market_data": {
                "ath": {"usd": 73750.07},
                "current_price": {"usd": 64000.0}
            }
        }"#;
        let parsed: CoinInfoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.market_data.ath.usd, dec!(73750.07));
    }

    #[test]
    fn test_parse_market_chart() {
        let json = r#"{"prices":[[1700000000000,60000.0],[1700086400000,62000.0]]}"#;
        let parsed: MarketChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.prices.len(), 2);
        assert_eq!(parsed.prices[1].1, dec!(62000.0));
    }

    #[test]
    fn test_mean_price_floors() {
        let prices = vec![
            (0.0, dec!(60000.5)),
            (1.0, dec!(61000.5)),
            (2.0, dec!(62000.5)),
        ];
        // mean = 61000.5 → floored
        assert_eq!(CoinGeckoClient::mean_price(&prices), Some(dec!(61000)));
    }

    #[test]
    fn test_mean_price_single_point() {
        let prices = vec![(0.0, dec!(58000.9))];
        assert_eq!(CoinGeckoClient::mean_price(&prices), Some(dec!(58000)));
    }

    #[test]
    fn test_mean_price_empty() {
        assert!(CoinGeckoClient::mean_price(&[]).is_none());
    }

    #[test]
    fn test_range_window_spans_200_days() {
        let now = Utc::now();
        let (from, to) = CoinGeckoClient::range_window(now);
        assert_eq!(to, now.timestamp());
        assert_eq!(to - from, 200 * 86_400);
    }

    #[test]
    fn test_new_client() {
        let client = CoinGeckoClient::new(std::time::Duration::from_secs(3));
        assert!(client.is_ok());
    }
}
