//! Browser and profile cleanup
//!
//! Runs once at the end of a run, whether the batch completed, failed or
//! was interrupted.

use chromiumoxide::Browser;
use log::{debug, warn};
use std::path::Path;

/// Result of cleanup operations
#[derive(Debug, Clone)]
pub enum CleanupResult {
    /// All cleanup operations succeeded
    Success,
    /// Some cleanup operations failed, with error details
    PartialFailure(Vec<String>),
}

/// Close the browser, wait for the process to exit, then drop its profile dir
///
/// The profile directory is removed only after `wait()` so Chrome has
/// released its file handles.
pub async fn cleanup_browser_and_data(
    browser: &mut Browser,
    chrome_data_dir: Option<&Path>,
) -> CleanupResult {
    let mut errors = Vec::new();

    debug!(target: "veo_video_url::cleanup", "Closing browser");
    if let Err(e) = browser.close().await {
        warn!(target: "veo_video_url::cleanup", "Failed to close browser: {e}");
        errors.push(format!("Browser close failed: {e}"));
    }

    debug!(target: "veo_video_url::cleanup", "Waiting for browser process to exit");
    if let Err(e) = browser.wait().await {
        warn!(target: "veo_video_url::cleanup", "Failed to wait for browser exit: {e}");
        errors.push(format!("Browser wait failed: {e}"));
    }

    if let Some(dir) = chrome_data_dir {
        debug!(target: "veo_video_url::cleanup", "Removing Chrome profile {}", dir.display());
        if let Err(e) = std::fs::remove_dir_all(dir) {
            warn!(target: "veo_video_url::cleanup", "Failed to remove Chrome profile: {e}");
            errors.push(format!("Directory cleanup failed: {e}"));
        }
    }

    if errors.is_empty() {
        CleanupResult::Success
    } else {
        CleanupResult::PartialFailure(errors)
    }
}
