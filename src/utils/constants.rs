//! Shared configuration constants
//!
//! Default values used by the config builder and the extraction components,
//! kept in one place to avoid magic numbers.

/// Base URL of the Veo video CDN.
///
/// Relative asset references found in page markup are joined against this.
pub const CDN_BASE_URL: &str = "https://c.veocdn.com/";

/// Hostname substring identifying a reference to the video CDN.
pub const CDN_HOST_MARKER: &str = "veocdn.com";

/// Filename substring identifying the per-match video asset.
pub const ASSET_FILE_MARKER: &str = "video.mp4";

/// Default wait for each readiness selector: 10 seconds
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Interval between `find_element` polls while waiting for a selector
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Unconditional wait after navigation so page scripts can start: 3 seconds
pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 3;

/// Pause between consecutive targets: 3 seconds
///
/// Keeps the request rate low enough to stay clear of rate limiting
/// and bot detection on the match pages.
pub const DEFAULT_REQUEST_DELAY_SECS: u64 = 3;

/// Timeout for `page.goto()`: 30 seconds
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// Number of near-miss `.mp4` candidates surfaced when resolution fails
pub const DEFAULT_MAX_NEAR_MISSES: usize = 3;

/// Default location of the input URL listing
pub const DEFAULT_INPUT_FILE: &str = "data/input/urls.txt";

/// Default location of the CSV report
pub const DEFAULT_OUTPUT_FILE: &str = "data/output/video_urls.csv";

/// Default directory for run log files
pub const DEFAULT_LOG_DIR: &str = "data/output/logs";

/// Chrome user agent string for stealth mode
///
/// Sent instead of the headless default so the match pages serve the
/// same markup a desktop Chrome would receive.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
