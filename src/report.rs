//! Extraction outcomes and CSV persistence

use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::errors::ExtractResult;
use crate::targets::Target;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeStatus {
    Success,
    Failed,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Success => f.write_str("Success"),
            OutcomeStatus::Failed => f.write_str("Failed"),
        }
    }
}

/// What one target produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutcome {
    pub target: Target,
    pub video_url: Option<String>,
}

impl ExtractionOutcome {
    #[must_use]
    pub fn new(target: Target, video_url: Option<String>) -> Self {
        Self { target, video_url }
    }

    #[must_use]
    pub fn failed(target: Target) -> Self {
        Self::new(target, None)
    }

    /// Derived from the presence of a video URL
    #[must_use]
    pub fn status(&self) -> OutcomeStatus {
        if self.video_url.is_some() {
            OutcomeStatus::Success
        } else {
            OutcomeStatus::Failed
        }
    }
}

/// Why the batch loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchTermination {
    /// Every target was processed
    Completed,
    /// The operator cancelled the run
    Interrupted,
    /// The browser session became unusable
    SessionLost(String),
}

/// Outcomes in input order plus how the run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<ExtractionOutcome>,
    pub termination: BatchTermination,
}

impl BatchReport {
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status() == OutcomeStatus::Success)
            .count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.termination == BatchTermination::Completed
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Base URL")]
    base_url: &'a str,
    #[serde(rename = "Video URL")]
    video_url: &'a str,
    #[serde(rename = "Status")]
    status: OutcomeStatus,
}

/// Write `outcomes` as `Base URL,Video URL,Status`, creating parent dirs
///
/// # Errors
///
/// `ExtractError::Io` or `ExtractError::Csv` when the file cannot be written.
pub fn write_csv(outcomes: &[ExtractionOutcome], path: &Path) -> ExtractResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    if outcomes.is_empty() {
        // serde only emits the header along with the first record
        writer.write_record(["Base URL", "Video URL", "Status"])?;
    }
    for outcome in outcomes {
        writer.serialize(CsvRow {
            base_url: outcome.target.url(),
            video_url: outcome.video_url.as_deref().unwrap_or(NOT_AVAILABLE),
            status: outcome.status(),
        })?;
    }
    writer.flush()?;

    info!("Results saved to {}", path.display());
    Ok(())
}
