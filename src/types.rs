//! Shared types for the BTCDASH agent.
//!
//! These types form the data model used across all modules: the per-cycle
//! indicator snapshot, the derived signal pair, and the fetch error
//! taxonomy shared by every source client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Indicator snapshot
// ---------------------------------------------------------------------------

/// One capture of every tracked indicator.
///
/// Built once per cycle by the aggregator and discarded at the end of the
/// cycle. Every field is optional: a failed fetch leaves its field absent
/// rather than poisoning the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Spot price in USD.
    pub price_usd: Option<Decimal>,
    /// All-time-high price in USD.
    pub all_time_high_usd: Option<Decimal>,
    /// 200-day moving average in whole USD (floored).
    pub moving_average_200d_usd: Option<Decimal>,
    /// Fear & Greed Index reading.
    pub fear_greed: Option<FearGreed>,
    /// Recommended transfer fee rates.
    pub fees: Option<FeeEstimates>,
    /// Instant the capture started.
    pub captured_at: DateTime<Utc>,
}

impl IndicatorSnapshot {
    /// Price divided by its 200-day moving average.
    ///
    /// `None` unless both inputs are present and the average is nonzero;
    /// a missing input must never degrade to a zero in a formula.
    pub fn mayer_multiple(&self) -> Option<Decimal> {
        match (self.price_usd, self.moving_average_200d_usd) {
            (Some(price), Some(ma)) if !ma.is_zero() => Some(price / ma),
            _ => None,
        }
    }

    /// Whether any source failed to deliver this cycle.
    pub fn missing_any(&self) -> bool {
        self.price_usd.is_none()
            || self.all_time_high_usd.is_none()
            || self.moving_average_200d_usd.is_none()
            || self.fear_greed.is_none()
            || self.fees.is_none()
    }

    /// An empty snapshot (every source failed) stamped with the given time.
    pub fn empty(captured_at: DateTime<Utc>) -> Self {
        Self {
            price_usd: None,
            all_time_high_usd: None,
            moving_average_200d_usd: None,
            fear_greed: None,
            fees: None,
            captured_at,
        }
    }

    /// Helper to build a fully populated snapshot with sensible values.
    #[cfg(test)]
    pub fn sample() -> Self {
        use rust_decimal_macros::dec;
        Self {
            price_usd: Some(dec!(60000)),
            all_time_high_usd: Some(dec!(73750)),
            moving_average_200d_usd: Some(dec!(65000)),
            fear_greed: Some(FearGreed {
                value: 20,
                label: "Extreme Fear".to_string(),
            }),
            fees: Some(FeeEstimates {
                fastest: 12,
                half_hour: 8,
                hour: 5,
            }),
            captured_at: Utc::now(),
        }
    }
}

impl fmt::Display for IndicatorSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let usd = |v: &Option<Decimal>| match v {
            Some(d) => format!("${d:.2}"),
            None => "N/A".to_string(),
        };
        write!(
            f,
            "price={} ath={} ma200={} fg={} half_hour_fee={}",
            usd(&self.price_usd),
            usd(&self.all_time_high_usd),
            usd(&self.moving_average_200d_usd),
            self.fear_greed
                .as_ref()
                .map(|fg| fg.value.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            self.fees
                .as_ref()
                .map(|fees| fees.half_hour.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        )
    }
}

/// Fear & Greed Index reading: a 0–100 sentiment score plus the
/// classification label the index publishes alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FearGreed {
    pub value: u8,
    /// e.g. "Extreme Fear", "Fear", "Neutral", "Greed".
    pub label: String,
}

impl fmt::Display for FearGreed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.label)
    }
}

/// Recommended transaction fee rates in sat/vB, by confirmation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimates {
    pub fastest: u64,
    pub half_hour: u64,
    pub hour: u64,
}

impl fmt::Display for FeeEstimates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fastest {} | half-hour {} | hour {}",
            self.fastest, self.half_hour, self.hour
        )
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// The derived signal pair for one cycle. Not persisted beyond the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    /// Conditions favourable for a lump buy.
    pub buy: bool,
    /// Conditions favourable for an on-chain transfer.
    pub transfer: bool,
}

impl fmt::Display for Signals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |on: bool| if on { "triggered" } else { "not triggered" };
        write!(f, "buy={} transfer={}", mark(self.buy), mark(self.transfer))
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failure of a single indicator fetch.
///
/// Network errors, non-2xx responses, and malformed bodies all collapse
/// into this one taxonomy so a partial or garbled value never surfaces.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
