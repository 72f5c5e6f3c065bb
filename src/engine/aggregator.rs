//! Snapshot aggregator.
//!
//! Invokes every indicator source exactly once per cycle, sequentially,
//! and combines the results into one [`IndicatorSnapshot`]. A failed fetch
//! is logged and leaves its field absent; no source's failure blocks
//! another's attempt, and capture itself never fails.

use chrono::Utc;
use tracing::{debug, warn};

use crate::sources::{FeeSource, MarketDataSource, SentimentSource};
use crate::types::{IndicatorSnapshot, SourceError};

/// Aggregates all indicator sources into a per-cycle snapshot.
pub struct SnapshotAggregator {
    market: Box<dyn MarketDataSource>,
    sentiment: Box<dyn SentimentSource>,
    fees: Box<dyn FeeSource>,
}

impl SnapshotAggregator {
    pub fn new(
        market: Box<dyn MarketDataSource>,
        sentiment: Box<dyn SentimentSource>,
        fees: Box<dyn FeeSource>,
    ) -> Self {
        Self {
            market,
            sentiment,
            fees,
        }
    }

    /// Capture one snapshot. The timestamp is stamped at capture start,
    /// before any network call.
    pub async fn capture(&self) -> IndicatorSnapshot {
        let captured_at = Utc::now();

        let price_usd = note("spot_price", self.market.spot_price().await);
        let all_time_high_usd = note("all_time_high", self.market.all_time_high().await);
        let moving_average_200d_usd = note(
            "moving_average_200d",
            self.market.moving_average_200d().await,
        );
        let fear_greed = note("fear_and_greed", self.sentiment.fear_and_greed().await);
        let fees = note("recommended_fees", self.fees.recommended_fees().await);

        let snapshot = IndicatorSnapshot {
            price_usd,
            all_time_high_usd,
            moving_average_200d_usd,
            fear_greed,
            fees,
            captured_at,
        };
        debug!(%snapshot, "Snapshot captured");
        snapshot
    }
}

/// Collapse a fetch outcome into an optional field, logging the failure.
fn note<T>(indicator: &'static str, outcome: Result<T, SourceError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(indicator, error = %e, "Indicator fetch failed, field left absent");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
