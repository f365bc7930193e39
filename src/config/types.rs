//! Core configuration types for extraction runs
//!
//! `ScrapeConfig` is the top-level, immutable configuration. The prober,
//! resolver and runner each receive their own section at construction so
//! tests can swap in short timeouts or synthetic rule sets.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::{
    ASSET_FILE_MARKER, CDN_BASE_URL, CDN_HOST_MARKER, DEFAULT_INPUT_FILE, DEFAULT_LOG_DIR,
    DEFAULT_MAX_NEAR_MISSES, DEFAULT_OUTPUT_FILE, DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_REQUEST_DELAY_SECS,
    DEFAULT_SETTLE_DELAY_SECS,
};

/// Main configuration struct for a batch extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Text file with one match-page URL per line
    pub(crate) input_file: PathBuf,
    /// CSV report destination
    pub(crate) output_file: PathBuf,
    /// Directory receiving the per-run log file
    pub(crate) log_dir: PathBuf,
    pub(crate) headless: bool,

    /// Chrome user data directory. When unset a per-process temp dir is used.
    #[serde(skip)]
    pub(crate) chrome_data_dir: Option<PathBuf>,

    /// Interval between `find_element` polls inside a selector wait
    pub(crate) poll_interval: Duration,

    pub(crate) runner: RunnerConfig,
    pub(crate) probe: ProbeConfig,
    pub(crate) resolver: ResolverConfig,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            headless: true,
            chrome_data_dir: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            runner: RunnerConfig::default(),
            probe: ProbeConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

/// Timing and side outputs of the per-target loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Unconditional wait after navigation, before probing
    pub settle_delay: Duration,
    /// Pause between targets (not applied after the last one)
    pub request_delay: Duration,
    /// Bound on a single `navigate` call
    pub page_load_timeout: Duration,
    /// When set, each page's rendered markup is written here (overwritten per page)
    pub debug_html_file: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(DEFAULT_SETTLE_DELAY_SECS),
            request_delay: Duration::from_secs(DEFAULT_REQUEST_DELAY_SECS),
            page_load_timeout: Duration::from_secs(DEFAULT_PAGE_LOAD_TIMEOUT_SECS),
            debug_html_file: None,
        }
    }
}

/// One readiness landmark and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessCheck {
    /// CSS selector
    pub selector: String,
    pub timeout: Duration,
}

impl ReadinessCheck {
    #[must_use]
    pub fn new(selector: impl Into<String>, timeout: Duration) -> Self {
        Self {
            selector: selector.into(),
            timeout,
        }
    }
}

/// Ordered readiness checks, most specific first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub checks: Vec<ReadinessCheck>,
}

impl ProbeConfig {
    /// Player container first, generic class-name substrings last
    pub const DEFAULT_SELECTORS: &'static [&'static str] = &[
        r#"div[data-cy="match-page-player-container"]"#,
        "video",
        ".video-player",
        r#"[class*="video"]"#,
        r#"[class*="player"]"#,
    ];

    #[must_use]
    pub fn new(checks: Vec<ReadinessCheck>) -> Self {
        Self { checks }
    }

    /// Default selectors, each with the same `timeout`
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            checks: Self::DEFAULT_SELECTORS
                .iter()
                .map(|selector| ReadinessCheck::new(*selector, timeout))
                .collect(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS))
    }
}

/// A named regular expression locating a candidate video reference.
///
/// If the pattern has a capture group, group 1 is the candidate;
/// otherwise the whole match is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRule {
    pub name: String,
    pub pattern: String,
}

impl ExtractionRule {
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Rules and markers driving the pattern resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Evaluated in order; the first rule producing an accepted candidate wins
    pub rules: Vec<ExtractionRule>,
    /// Base URL relative asset references are joined against
    pub cdn_base: String,
    pub cdn_host_marker: String,
    pub asset_file_marker: String,
    /// Secondary filter for CDN references without the asset marker
    pub uuid_segment_pattern: String,
    /// Diagnostic scan run only when resolution fails
    pub near_miss_pattern: String,
    pub max_near_misses: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                ExtractionRule::new(
                    "direct-asset",
                    r#"https://c\.veocdn\.com/[^"']+/standard/machine/[^"']+/video\.mp4"#,
                ),
                ExtractionRule::new("data-video-url", r#"data-video-url="([^"]+)""#),
                ExtractionRule::new("cdn-src", r#"src="(https://c\.veocdn\.com/[^"]+)""#),
                ExtractionRule::new("video-src", r#"video-src="([^"]+)""#),
                ExtractionRule::new("json-url", r#""url":"(https://c\.veocdn\.com[^"]+)""#),
            ],
            cdn_base: CDN_BASE_URL.to_string(),
            cdn_host_marker: CDN_HOST_MARKER.to_string(),
            asset_file_marker: ASSET_FILE_MARKER.to_string(),
            uuid_segment_pattern:
                r"/[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}/".to_string(),
            near_miss_pattern: r#"https?://[^"']+\.mp4[^"']*"#.to_string(),
            max_near_misses: DEFAULT_MAX_NEAR_MISSES,
        }
    }
}
