//! Getter methods for `ScrapeConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::{ProbeConfig, ResolverConfig, RunnerConfig, ScrapeConfig};

impl ScrapeConfig {
    #[must_use]
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    #[must_use]
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    #[must_use]
    pub fn runner(&self) -> &RunnerConfig {
        &self.runner
    }

    #[must_use]
    pub fn probe(&self) -> &ProbeConfig {
        &self.probe
    }

    #[must_use]
    pub fn resolver(&self) -> &ResolverConfig {
        &self.resolver
    }
}
