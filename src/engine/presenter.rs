//! Console presentation.
//!
//! Renders a snapshot and its signals into the fixed human-readable
//! layout printed once per cycle and appended to the run journal.
//! Deterministic: the same snapshot always renders to the same text.

use rust_decimal::Decimal;

use crate::types::{IndicatorSnapshot, Signals};

/// Marker rendered in place of a value whose source fetch failed.
const UNAVAILABLE: &str = "N/A";

/// Render the per-cycle report.
pub fn render(snapshot: &IndicatorSnapshot, signals: &Signals) -> String {
    let mut lines = Vec::new();

    lines.push(format!("BTC price:        {}", usd(&snapshot.price_usd)));
    lines.push(format!(
        "All-time high:    {}",
        usd(&snapshot.all_time_high_usd)
    ));
    lines.push(format!(
        "200-day MA:       {}",
        whole_usd(&snapshot.moving_average_200d_usd)
    ));
    lines.push(format!(
        "Mayer Multiple:   {}",
        ratio(&snapshot.mayer_multiple())
    ));
    lines.push(format!(
        "Fear & Greed:     {}",
        snapshot
            .fear_greed
            .as_ref()
            .map(|fg| fg.to_string())
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    ));
    lines.push(format!(
        "Fees (sat/vB):    {}",
        snapshot
            .fees
            .as_ref()
            .map(|fees| fees.to_string())
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    ));

    lines.push(format!("BUY SIGNAL:       {}", state(signals.buy)));
    lines.push(format!("TRANSFER SIGNAL:  {}", state(signals.transfer)));

    if snapshot.missing_any() {
        lines.push("warning: one or more sources unavailable this cycle".to_string());
    }

    lines.join("\n")
}

fn state(triggered: bool) -> &'static str {
    if triggered {
        "triggered"
    } else {
        "not triggered"
    }
}

fn usd(value: &Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${v:.2}"),
        None => UNAVAILABLE.to_string(),
    }
}

fn whole_usd(value: &Option<Decimal>) -> String {
    match value {
        Some(v) => format!("${v:.0}"),
        None => UNAVAILABLE.to_string(),
    }
}

fn ratio(value: &Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => UNAVAILABLE.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
