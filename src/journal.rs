//! Per-run journal.
//!
//! One log file per run, named from the run's start time with minute
//! precision and created fresh (never appended across runs). Each cycle
//! appends the same report the presenter printed. A write failure is
//! reported once and never stops the loop.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Run-file name pattern, e.g. `2026-08-04_12-30.log`.
const FILE_NAME_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Writer for the current run's log file.
pub struct Journal {
    path: PathBuf,
    file: File,
    write_failed: bool,
}

impl Journal {
    /// Establish the log directory and create this run's file.
    ///
    /// The directory is created if absent; the file is truncated if a run
    /// started within the same minute left one behind. Any failure here is
    /// a startup failure; the caller is expected to abort.
    pub fn create(dir: &Path, started_at: DateTime<Utc>) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

        let path = dir.join(format!("{}.log", started_at.format(FILE_NAME_FORMAT)));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create run log file: {}", path.display()))?;

        info!(path = %path.display(), "Run journal created");
        Ok(Self {
            path,
            file,
            write_failed: false,
        })
    }

    /// Path of this run's log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one cycle's report.
    ///
    /// Never fails: the first write error is logged, later ones are
    /// swallowed, and the loop carries on either way.
    pub fn record(&mut self, captured_at: DateTime<Utc>, body: &str) {
        match self.write_entry(captured_at, body) {
            Ok(()) => debug!(path = %self.path.display(), "Journal entry written"),
            Err(e) => {
                if !self.write_failed {
                    error!(
                        path = %self.path.display(),
                        error = %e,
                        "Failed to write journal entry; reporting continues without it"
                    );
                    self.write_failed = true;
                }
            }
        }
    }

    fn write_entry(&mut self, captured_at: DateTime<Utc>, body: &str) -> std::io::Result<()> {
        writeln!(
            self.file,
            "--- {} ---",
            captured_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.file, "{body}")?;
        self.file.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
