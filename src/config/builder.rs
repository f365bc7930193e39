//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! The input listing and the report destination are required; everything
//! else falls back to the defaults in `utils::constants`.

use anyhow::{Result, anyhow};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use super::types::{ProbeConfig, ResolverConfig, RunnerConfig, ScrapeConfig};
use crate::utils::{DEFAULT_LOG_DIR, DEFAULT_POLL_INTERVAL_MS};

// Type states for the builder
pub struct WithInputFile;
pub struct Complete;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) input_file: Option<PathBuf>,
    pub(crate) output_file: Option<PathBuf>,
    pub(crate) log_dir: PathBuf,
    pub(crate) headless: bool,
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) poll_interval: Duration,
    pub(crate) runner: RunnerConfig,
    pub(crate) probe: ProbeConfig,
    pub(crate) resolver: ResolverConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            input_file: None,
            output_file: None,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            headless: true,
            chrome_data_dir: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            runner: RunnerConfig::default(),
            probe: ProbeConfig::default(),
            resolver: ResolverConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl<State> ScrapeConfigBuilder<State> {
    fn transition<Next>(self) -> ScrapeConfigBuilder<Next> {
        ScrapeConfigBuilder {
            input_file: self.input_file,
            output_file: self.output_file,
            log_dir: self.log_dir,
            headless: self.headless,
            chrome_data_dir: self.chrome_data_dir,
            poll_interval: self.poll_interval,
            runner: self.runner,
            probe: self.probe,
            resolver: self.resolver,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn input_file(mut self, path: impl Into<PathBuf>) -> ScrapeConfigBuilder<WithInputFile> {
        self.input_file = Some(path.into());
        self.transition()
    }
}

impl ScrapeConfigBuilder<WithInputFile> {
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> ScrapeConfigBuilder<Complete> {
        self.output_file = Some(path.into());
        self.transition()
    }
}

// Build method only available when all required fields are set
impl ScrapeConfigBuilder<Complete> {
    pub fn build(self) -> Result<ScrapeConfig> {
        if self.probe.checks.is_empty() {
            return Err(anyhow!("at least one readiness check is required"));
        }
        if self.resolver.rules.is_empty() {
            return Err(anyhow!("at least one extraction rule is required"));
        }
        if self.poll_interval.is_zero() {
            return Err(anyhow!("poll interval must be greater than zero"));
        }

        // Enforce headless mode in release builds
        #[cfg(not(debug_assertions))]
        let headless = if !self.headless {
            tracing::warn!(
                "Forcing headless mode in release build. \
                Headed mode is only available in debug builds for development."
            );
            true
        } else {
            self.headless
        };

        #[cfg(debug_assertions)]
        let headless = self.headless;

        Ok(ScrapeConfig {
            input_file: self
                .input_file
                .ok_or_else(|| anyhow!("input_file is required"))?,
            output_file: self
                .output_file
                .ok_or_else(|| anyhow!("output_file is required"))?,
            log_dir: self.log_dir,
            headless,
            chrome_data_dir: self.chrome_data_dir,
            poll_interval: self.poll_interval,
            runner: self.runner,
            probe: self.probe,
            resolver: self.resolver,
        })
    }
}
