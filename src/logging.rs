//! Subscriber setup for the binary
//!
//! Every run logs to stderr and to its own timestamped file under the log
//! directory. `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// `veo_scraper_<YYYYmmdd_HHMMSS>.log` for the current local time
#[must_use]
pub fn log_file_name() -> String {
    format!(
        "veo_scraper_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

/// Install the global subscriber and return the log file path
///
/// # Errors
///
/// Fails when the log directory or file cannot be created, or a global
/// subscriber is already installed.
pub fn init(log_dir: &Path, verbose: bool) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join(log_file_name());
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{default_directive},chromiumoxide=warn").into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(log_path)
}
