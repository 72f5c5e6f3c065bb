//! BTCDASH — Bitcoin market indicator dashboard.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! establishes the per-run journal, and drives the capture→evaluate→
//! present→record loop on a fixed cadence with graceful shutdown.

use anyhow::Result;
use chrono::Utc;
use std::time::Duration;
use tracing::info;

use btcdash::config::AppConfig;
use btcdash::engine::aggregator::SnapshotAggregator;
use btcdash::engine::evaluator::{SignalConfig, SignalEvaluator};
use btcdash::engine::presenter;
use btcdash::journal::Journal;
use btcdash::sources::alternative_me::AlternativeMeClient;
use btcdash::sources::coingecko::CoinGeckoClient;
use btcdash::sources::mempool_space::MempoolSpaceClient;

const BANNER: &str = r#"
 ____ _____ ____   ____    _    ____  _   _
| __ )_   _/ ___| |  _ \  / \  / ___|| | | |
|  _ \ | || |     | | | |/ _ \ \___ \| |_| |
| |_) || || |___  | |_| / ___ \ ___) |  _  |
|____/ |_| \____| |____/_/   \_\____/|_| |_|

  Bitcoin market indicator dashboard
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML (defaults when the file is absent)
    let cfg = AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");
    info!(
        interval_secs = cfg.poll.interval_secs,
        request_timeout_secs = cfg.sources.request_timeout_secs,
        log_dir = %cfg.journal.directory.display(),
        "BTCDASH starting up"
    );

    // -- Initialise components -------------------------------------------

    let timeout = Duration::from_secs(cfg.sources.request_timeout_secs);
    let aggregator = SnapshotAggregator::new(
        Box::new(CoinGeckoClient::new(timeout)?),
        Box::new(AlternativeMeClient::new(timeout)?),
        Box::new(MempoolSpaceClient::new(timeout)?),
    );
    let evaluator = SignalEvaluator::new(SignalConfig::from(&cfg.signals));

    // Failure to establish the log directory is fatal.
    let mut journal = Journal::create(&cfg.journal.directory, Utc::now())?;

    // -- Main loop -------------------------------------------------------

    let mut interval = tokio::time::interval(Duration::from_secs(cfg.poll.interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        interval_secs = cfg.poll.interval_secs,
        "Entering main loop. Press Ctrl+C to stop."
    );

    let mut cycle: u64 = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                cycle += 1;
                run_cycle(&aggregator, &evaluator, &mut journal, cycle).await;
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    info!(
        cycles = cycle,
        journal = %journal.path().display(),
        "BTCDASH shut down cleanly."
    );

    Ok(())
}

/// Run a single capture→evaluate→present→record cycle.
///
/// Never fails: per-source failures surface as absent snapshot fields and
/// a journal failure is contained inside `record`.
async fn run_cycle(
    aggregator: &SnapshotAggregator,
    evaluator: &SignalEvaluator,
    journal: &mut Journal,
    cycle: u64,
) {
    info!(cycle, "Starting cycle");

    let snapshot = aggregator.capture().await;
    let signals = evaluator.evaluate(&snapshot);
    let report = presenter::render(&snapshot, &signals);

    println!("{report}\n");
    journal.record(snapshot.captured_at, &report);

    info!(
        cycle,
        buy = signals.buy,
        transfer = signals.transfer,
        degraded = snapshot.missing_any(),
        "Cycle complete"
    );
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("btcdash=info"));

    let json_logging = std::env::var("BTCDASH_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
