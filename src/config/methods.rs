//! Builder methods available for all states

use std::path::PathBuf;
use std::time::Duration;

use super::builder::ScrapeConfigBuilder;
use super::types::{ProbeConfig, ResolverConfig};

impl<State> ScrapeConfigBuilder<State> {
    #[must_use]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Set browser headless mode
    ///
    /// Headed mode shows a visible Chrome window, which is handy when a page
    /// layout changes and the readiness selectors need revisiting. It is
    /// only honored in debug builds; release builds force headless.
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chrome_data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.runner.settle_delay = delay;
        self
    }

    #[must_use]
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.runner.request_delay = delay;
        self
    }

    #[must_use]
    pub fn page_load_timeout(mut self, timeout: Duration) -> Self {
        self.runner.page_load_timeout = timeout;
        self
    }

    /// Write each page's rendered markup to `path` for offline inspection
    #[must_use]
    pub fn debug_html_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.runner.debug_html_file = Some(path.into());
        self
    }

    /// Apply the same wait to every default readiness selector
    #[must_use]
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe = ProbeConfig::with_timeout(timeout);
        self
    }

    #[must_use]
    pub fn probe(mut self, probe: ProbeConfig) -> Self {
        self.probe = probe;
        self
    }

    #[must_use]
    pub fn resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }
}
