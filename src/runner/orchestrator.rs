//! Top-level run: targets in, CSV out, browser released
//!
//! Once a session exists, the report is persisted and the session closed
//! on every path out of the run, including interruption and session loss.

use std::path::Path;
use tracing::{error, info, warn};

use super::BatchRunner;
use crate::cancel::CancelSignal;
use crate::config::ScrapeConfig;
use crate::errors::{ExtractError, ExtractResult};
use crate::report::{BatchReport, BatchTermination, write_csv};
use crate::session::{ChromiumSession, PageSession};
use crate::targets::{Target, read_targets};

/// Read targets, launch Chrome, extract, persist
///
/// # Errors
///
/// * `ExtractError::NoTargets` - the listing had no usable URLs
/// * `ExtractError::Setup` - the browser could not be launched
/// * `ExtractError::Io` / `ExtractError::Csv` - the report could not be written
pub async fn run_batch(config: &ScrapeConfig, cancel: &CancelSignal) -> ExtractResult<BatchReport> {
    let targets = read_targets(config.input_file()).await?;
    if targets.is_empty() {
        error!("No URLs found in {}", config.input_file().display());
        return Err(ExtractError::NoTargets(config.input_file().to_path_buf()));
    }

    // Compile rules before paying for a browser launch
    let runner = BatchRunner::from_config(config)?;

    info!("Setting up browser session");
    let session = ChromiumSession::launch(config).await.map_err(|e| {
        error!("Failed to set up browser: {e:#}");
        ExtractError::from(e)
    })?;

    finish_batch(session, &runner, &targets, config.output_file(), cancel).await
}

/// Run `targets` on an already-open `session`, then persist and close
///
/// The session is consumed and closed exactly once whatever the run's
/// outcome. A close failure is logged only; a persistence failure is
/// returned after the session is closed.
///
/// # Errors
///
/// `ExtractError::Io` / `ExtractError::Csv` when the report cannot be written.
pub async fn finish_batch<S: PageSession>(
    session: S,
    runner: &BatchRunner,
    targets: &[Target],
    output_file: &Path,
    cancel: &CancelSignal,
) -> ExtractResult<BatchReport> {
    let report = runner.run(&session, targets, cancel).await;

    match &report.termination {
        BatchTermination::Completed => {}
        BatchTermination::Interrupted => warn!("Process interrupted by user, saving partial results"),
        BatchTermination::SessionLost(reason) => error!("Browser session lost: {reason}"),
    }

    let persisted = write_csv(&report.outcomes, output_file);
    if let Err(e) = &persisted {
        error!("Failed to save results to {}: {e}", output_file.display());
    }

    if let Err(e) = session.close().await {
        warn!("Browser session did not close cleanly: {e}");
    }

    info!("Processing complete");
    info!(
        "Successfully extracted: {}/{}",
        report.success_count(),
        report.outcomes.len()
    );

    persisted.map(|()| report)
}
