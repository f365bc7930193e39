//! Sequential batch extraction over one page session
//!
//! Targets are processed strictly one at a time in input order. A failure
//! on one target is recorded and the loop moves on; only a fatal session
//! fault or operator cancellation ends the run early, and outcomes gathered
//! so far are always kept.

mod orchestrator;

pub use orchestrator::{finish_batch, run_batch};

use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::cancel::CancelSignal;
use crate::config::{RunnerConfig, ScrapeConfig};
use crate::errors::{ExtractResult, SessionResult};
use crate::prober::ReadinessProber;
use crate::report::{BatchReport, BatchTermination, ExtractionOutcome};
use crate::resolver::{PatternResolver, Resolution};
use crate::session::{PageSession, with_timeout};
use crate::targets::Target;

#[derive(Debug, Clone)]
pub struct BatchRunner {
    prober: ReadinessProber,
    resolver: PatternResolver,
    config: RunnerConfig,
}

impl BatchRunner {
    #[must_use]
    pub fn new(prober: ReadinessProber, resolver: PatternResolver, config: RunnerConfig) -> Self {
        Self {
            prober,
            resolver,
            config,
        }
    }

    /// Build every component from a full configuration
    ///
    /// # Errors
    ///
    /// Fails when a resolver pattern does not compile.
    pub fn from_config(config: &ScrapeConfig) -> ExtractResult<Self> {
        Ok(Self::new(
            ReadinessProber::new(config.probe().clone()),
            PatternResolver::new(config.resolver())?,
            config.runner().clone(),
        ))
    }

    /// Process `targets` in order on `session`
    ///
    /// Returns one outcome per target that finished processing. A target
    /// interrupted mid-flight by `cancel` is not recorded.
    pub async fn run<S: PageSession>(
        &self,
        session: &S,
        targets: &[Target],
        cancel: &CancelSignal,
    ) -> BatchReport {
        let total = targets.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, target) in targets.iter().enumerate() {
            if cancel.is_cancelled() {
                return interrupted(outcomes);
            }

            info!("Processing URL {}/{}: {}", index + 1, total, target);

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return interrupted(outcomes),
                result = self.process_target(session, target) => result,
            };

            match result {
                Ok(video_url) => outcomes.push(ExtractionOutcome::new(target.clone(), video_url)),
                Err(e) => {
                    error!("Error processing {target}: {e}");
                    outcomes.push(ExtractionOutcome::failed(target.clone()));

                    if e.is_fatal() {
                        error!("Browser session is unusable, stopping after {} of {total} URLs", index + 1);
                        return BatchReport {
                            outcomes,
                            termination: BatchTermination::SessionLost(e.to_string()),
                        };
                    }
                }
            }

            if index + 1 < total && !self.config.request_delay.is_zero() {
                debug!("Waiting {:?} before next URL", self.config.request_delay);
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => return interrupted(outcomes),
                    () = tokio::time::sleep(self.config.request_delay) => {}
                }
            }
        }

        BatchReport {
            outcomes,
            termination: BatchTermination::Completed,
        }
    }

    /// Navigate, wait, and resolve one target
    ///
    /// `Ok(None)` means the page loaded but held no recognizable video.
    async fn process_target<S: PageSession>(
        &self,
        session: &S,
        target: &Target,
    ) -> SessionResult<Option<String>> {
        with_timeout(
            session.navigate(target.url()),
            self.config.page_load_timeout,
            "Page navigation",
        )
        .await?;

        tokio::time::sleep(self.config.settle_delay).await;

        let probe = self.prober.probe(session).await?;
        debug!("Readiness probe for {target}: {probe:?}");

        let markup = with_timeout(
            session.current_markup(),
            self.config.page_load_timeout,
            "Page content",
        )
        .await?;

        if let Some(path) = &self.config.debug_html_file {
            write_snapshot(path, &markup).await;
        }

        match self.resolver.resolve_detailed(&markup) {
            Resolution::Resolved { url, .. } => {
                info!("Successfully extracted video URL: {url}");
                Ok(Some(url))
            }
            Resolution::Unresolved { near_misses } => {
                warn!("Could not find video URL for {target}");
                if !near_misses.is_empty() {
                    info!("Found potential video URLs:");
                    for candidate in &near_misses {
                        info!("  {candidate}");
                    }
                }
                Ok(None)
            }
        }
    }
}

fn interrupted(outcomes: Vec<ExtractionOutcome>) -> BatchReport {
    warn!("Run interrupted after {} URLs", outcomes.len());
    BatchReport {
        outcomes,
        termination: BatchTermination::Interrupted,
    }
}

/// Overwrite the debug snapshot with the current page markup
async fn write_snapshot(path: &Path, markup: &str) {
    match tokio::fs::write(path, markup).await {
        Ok(()) => debug!("Saved page source to {}", path.display()),
        Err(e) => warn!("Failed to write page snapshot {}: {e}", path.display()),
    }
}
