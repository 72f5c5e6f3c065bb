//! External indicator sources.
//!
//! Defines the source traits and provides a client per public endpoint:
//! - CoinGecko: spot price, all-time high, 200-day moving average
//! - alternative.me: Fear & Greed Index
//! - mempool.space: recommended transfer fees
//!
//! Every fetch makes exactly one outbound call and collapses any failure
//! (transport, non-2xx status, malformed body) into [`SourceError`].

pub mod alternative_me;
pub mod coingecko;
pub mod mempool_space;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::types::{FearGreed, FeeEstimates, SourceError};

/// Price-series indicators for the tracked asset.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Current spot price in USD.
    async fn spot_price(&self) -> Result<Decimal, SourceError>;

    /// Highest recorded price in USD.
    async fn all_time_high(&self) -> Result<Decimal, SourceError>;

    /// 200-day moving average in whole USD.
    async fn moving_average_200d(&self) -> Result<Decimal, SourceError>;
}

/// Market sentiment indicator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Current Fear & Greed Index reading.
    async fn fear_and_greed(&self) -> Result<FearGreed, SourceError>;
}

/// On-chain fee-rate indicator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeeSource: Send + Sync {
    /// Recommended fee rates by confirmation target.
    async fn recommended_fees(&self) -> Result<FeeEstimates, SourceError>;
}
