//! Signal derivation.
//!
//! Maps an indicator snapshot to the buy/transfer signal pair. Pure and
//! deterministic: no I/O, no hidden state, and a missing input never
//! triggers a positive signal.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::SignalsConfig;
use crate::types::{IndicatorSnapshot, Signals};

// ---------------------------------------------------------------------------
// Configuration (defaults, overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Signal thresholds.
///
/// Boundary semantics are exact: the Mayer threshold is strict (`< 1.0`
/// does not include 1.0), the other two are inclusive.
#[derive(Debug, Clone)]
pub struct SignalConfig {
    /// Buy requires the Mayer Multiple strictly below this.
    pub mayer_buy_threshold: Decimal,
    /// Buy requires the Fear & Greed Index at or below this.
    pub fear_greed_buy_threshold: u8,
    /// Transfer requires the half-hour fee at or below this (sat/vB).
    pub transfer_fee_threshold: u64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            mayer_buy_threshold: dec!(1.0),
            fear_greed_buy_threshold: 25,
            transfer_fee_threshold: 15,
        }
    }
}

impl From<&SignalsConfig> for SignalConfig {
    fn from(cfg: &SignalsConfig) -> Self {
        Self {
            mayer_buy_threshold: cfg.mayer_buy_threshold,
            fear_greed_buy_threshold: cfg.fear_greed_buy_threshold,
            transfer_fee_threshold: cfg.transfer_fee_threshold_sat_vb,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Derives the signal pair from a snapshot.
pub struct SignalEvaluator {
    config: SignalConfig,
}

impl SignalEvaluator {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Evaluate one snapshot.
    ///
    /// `buy` fires only when both the Mayer Multiple and the Fear & Greed
    /// Index are present and satisfy their thresholds. `transfer` fires
    /// only when the half-hour fee is present and at or below its
    /// threshold.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Signals {
        let buy = match (snapshot.mayer_multiple(), &snapshot.fear_greed) {
            (Some(mayer), Some(fg)) => {
                mayer < self.config.mayer_buy_threshold
                    && fg.value <= self.config.fear_greed_buy_threshold
            }
            _ => false,
        };

        let transfer = snapshot
            .fees
            .map(|fees| fees.half_hour <= self.config.transfer_fee_threshold)
            .unwrap_or(false);

        Signals { buy, transfer }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FearGreed, FeeEstimates};
    use rust_decimal_macros::dec;

    fn evaluator() -> SignalEvaluator {
        SignalEvaluator::new(SignalConfig::default())
    }

    fn fg(value: u8) -> Option<FearGreed> {
        Some(FearGreed {
            value,
            label: "Fear".to_string(),
        })
    }

    fn fees(half_hour: u64) -> Option<FeeEstimates> {
        Some(FeeEstimates {
            fastest: half_hour + 4,
            half_hour,
            hour: half_hour.saturating_sub(3),
        })
    }

    #[test]
    fn test_buy_fires_below_both_thresholds() {
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.price_usd = Some(dec!(60000));
        snapshot.moving_average_200d_usd = Some(dec!(65000)); // mayer ≈ 0.923
        snapshot.fear_greed = fg(20);
        assert!(evaluator().evaluate(&snapshot).buy);
    }

    #[test]
    fn test_buy_blocked_by_high_mayer() {
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.price_usd = Some(dec!(60000));
        snapshot.moving_average_200d_usd = Some(dec!(50000)); // mayer = 1.2
        snapshot.fear_greed = fg(5);
        assert!(!evaluator().evaluate(&snapshot).buy);
    }

    #[test]
    fn test_buy_boundary_mayer_exactly_one() {
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.price_usd = Some(dec!(65000));
        snapshot.moving_average_200d_usd = Some(dec!(65000)); // mayer = 1.0 exactly
        snapshot.fear_greed = fg(10);
        assert!(!evaluator().evaluate(&snapshot).buy);
    }

    #[test]
    fn test_buy_boundary_fear_greed_exactly_25() {
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.price_usd = Some(dec!(60000));
        snapshot.moving_average_200d_usd = Some(dec!(65000));
        snapshot.fear_greed = fg(25); // inclusive boundary
        assert!(evaluator().evaluate(&snapshot).buy);
        snapshot.fear_greed = fg(26);
        assert!(!evaluator().evaluate(&snapshot).buy);
    }

    #[test]
    fn test_buy_requires_fear_greed_present() {
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.fear_greed = None;
        assert!(!evaluator().evaluate(&snapshot).buy);
    }

    #[test]
    fn test_buy_requires_mayer_present() {
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.moving_average_200d_usd = None;
        snapshot.fear_greed = fg(5);
        assert!(!evaluator().evaluate(&snapshot).buy);
    }

    #[test]
    fn test_transfer_boundary_inclusive() {
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.fees = fees(15);
        assert!(evaluator().evaluate(&snapshot).transfer);
        snapshot.fees = fees(16);
        assert!(!evaluator().evaluate(&snapshot).transfer);
    }

    #[test]
    fn test_transfer_requires_fees_present() {
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.fees = None;
        assert!(!evaluator().evaluate(&snapshot).transfer);
    }

    #[test]
    fn test_empty_snapshot_yields_no_signals() {
        let snapshot = IndicatorSnapshot::empty(chrono::Utc::now());
        let signals = evaluator().evaluate(&snapshot);
        assert!(!signals.buy);
        assert!(!signals.transfer);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let snapshot = IndicatorSnapshot::sample();
        let eval = evaluator();
        assert_eq!(eval.evaluate(&snapshot), eval.evaluate(&snapshot));
    }

    #[test]
    fn test_custom_thresholds() {
        let eval = SignalEvaluator::new(SignalConfig {
            mayer_buy_threshold: dec!(1.5),
            fear_greed_buy_threshold: 50,
            transfer_fee_threshold: 30,
        });
        let mut snapshot = IndicatorSnapshot::sample();
        snapshot.price_usd = Some(dec!(60000));
        snapshot.moving_average_200d_usd = Some(dec!(50000)); // mayer = 1.2 < 1.5
        snapshot.fear_greed = fg(40);
        snapshot.fees = fees(30);
        let signals = eval.evaluate(&snapshot);
        assert!(signals.buy);
        assert!(signals.transfer);
    }
}
