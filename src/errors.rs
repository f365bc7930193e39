//! Error types for extraction runs
//!
//! `SessionError` covers faults raised by a page session (navigation,
//! CDP, lost browser). `ExtractError` is the crate-level error for setup
//! and persistence. A page without a detectable video is not an error.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for page session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type alias for extraction runs
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Faults raised by a `PageSession`
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Navigation to the target failed
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A bounded browser operation ran out of time
    #[error("{operation} timeout after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// The browser answered with an error
    #[error("Browser protocol error: {0}")]
    Protocol(String),

    /// The browser session is gone and cannot be reused
    #[error("Browser session lost: {0}")]
    Disconnected(String),
}

impl SessionError {
    /// Whether the session is unusable after this error
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Disconnected(_))
    }
}

/// Crate-level error for setup, configuration and report persistence
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The browser session could not be established
    #[error("Setup failed: {0}")]
    Setup(String),

    /// The input listing had no usable URLs
    #[error("No URLs found in {}", .0.display())]
    NoTargets(PathBuf),

    /// An extraction rule did not compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Browser discovery and launch report through anyhow
impl From<anyhow::Error> for ExtractError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the context chain
        Self::Setup(format!("{err:#}"))
    }
}
