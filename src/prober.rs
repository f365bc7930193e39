//! Page readiness probing
//!
//! Match pages render their player client-side with no reliable "loaded"
//! signal. The prober walks an ordered list of UI landmarks, giving each
//! its own bounded wait, and stops at the first one that shows up.
//! Finding nothing is a hint, not a failure: the caller inspects the markup
//! either way.

use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::errors::SessionResult;
use crate::session::PageSession;

/// Result of a readiness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// An element matching `selector` appeared
    Found { selector: String },
    /// Every check ran out of time
    NotFound,
}

impl ProbeOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, ProbeOutcome::Found { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ReadinessProber {
    config: ProbeConfig,
}

impl ReadinessProber {
    #[must_use]
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Wait for the first readiness landmark on an already-navigated page
    ///
    /// Checks run strictly in order, each bounded by its own timeout.
    ///
    /// # Errors
    ///
    /// Only session faults propagate; per-check timeouts are absorbed.
    pub async fn probe<S: PageSession>(&self, session: &S) -> SessionResult<ProbeOutcome> {
        for check in &self.config.checks {
            debug!(
                "Waiting up to {:?} for selector {}",
                check.timeout, check.selector
            );

            if session
                .wait_for_selector(&check.selector, check.timeout)
                .await?
            {
                info!("Found element with selector: {}", check.selector);
                return Ok(ProbeOutcome::Found {
                    selector: check.selector.clone(),
                });
            }
        }

        warn!("No video container found with known selectors, inspecting page source anyway");
        Ok(ProbeOutcome::NotFound)
    }
}
