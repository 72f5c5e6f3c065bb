//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every key has a default matching the stock behaviour, so the file is
//! optional: an absent file yields the default configuration, while an
//! unparsable file is a startup error.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub signals: SignalsConfig,
    #[serde(default)]
    pub journal: JournalConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    /// Seconds between cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    /// Per-request timeout applied to every outbound fetch.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SignalsConfig {
    /// Buy requires the Mayer Multiple strictly below this.
    #[serde(default = "default_mayer_buy_threshold")]
    pub mayer_buy_threshold: Decimal,
    /// Buy requires the Fear & Greed Index at or below this.
    #[serde(default = "default_fear_greed_buy_threshold")]
    pub fear_greed_buy_threshold: u8,
    /// Transfer requires the half-hour fee at or below this (sat/vB).
    #[serde(default = "default_transfer_fee_threshold")]
    pub transfer_fee_threshold_sat_vb: u64,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            mayer_buy_threshold: default_mayer_buy_threshold(),
            fear_greed_buy_threshold: default_fear_greed_buy_threshold(),
            transfer_fee_threshold_sat_vb: default_transfer_fee_threshold(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JournalConfig {
    /// Directory holding one log file per run.
    #[serde(default = "default_journal_dir")]
    pub directory: PathBuf,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            directory: default_journal_dir(),
        }
    }
}

fn default_interval_secs() -> u64 {
    1800
}

fn default_request_timeout_secs() -> u64 {
    3
}

fn default_mayer_buy_threshold() -> Decimal {
    dec!(1.0)
}

fn default_fear_greed_buy_threshold() -> u8 {
    25
}

fn default_transfer_fee_threshold() -> u64 {
    15
}

fn default_journal_dir() -> PathBuf {
    std::env::temp_dir().join("btc_dash")
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error; the defaults describe a fully
    /// working setup. A file that exists but fails to parse is fatal.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }
}
