//! Locating and launching Chrome for match-page sessions
//!
//! Lookup order is `CHROMIUM_PATH`, well-known install locations, `which`
//! on Unix, and finally a managed Chromium download cached per user.

use anyhow::{Context, Result, anyhow};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::handler::Handler;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use crate::utils::constants::CHROME_USER_AGENT;

/// Flags that hide automation markers and keep a long batch quiet
const STEALTH_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-popup-blocking",
    "--disable-extensions",
    "--no-first-run",
    "--no-default-browser-check",
    "--password-store=basic",
    "--use-mock-keychain",
];

/// Flags for running unattended in containers and CI
const RUNTIME_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-breakpad",
    "--disable-hang-monitor",
    "--disable-background-timer-throttling",
    "--disable-backgrounding-occluded-windows",
    "--disable-features=TranslateUI",
    "--hide-scrollbars",
    "--mute-audio",
];

const PATH_COMMANDS: &[&str] = &["chromium", "chromium-browser", "google-chrome", "chrome"];

#[cfg(target_os = "windows")]
const INSTALL_LOCATIONS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files\Chromium\Application\chrome.exe",
];

#[cfg(target_os = "macos")]
const INSTALL_LOCATIONS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/opt/homebrew/bin/chromium",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const INSTALL_LOCATIONS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/usr/local/bin/chromium",
    "/opt/google/chrome/chrome",
];

fn from_env() -> Option<PathBuf> {
    let path = PathBuf::from(std::env::var_os("CHROMIUM_PATH")?);
    if path.exists() {
        info!("Using browser from CHROMIUM_PATH: {}", path.display());
        Some(path)
    } else {
        warn!("CHROMIUM_PATH does not exist: {}", path.display());
        None
    }
}

fn from_install_locations() -> Option<PathBuf> {
    let path = INSTALL_LOCATIONS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())?;
    info!("Found browser at: {}", path.display());
    Some(path)
}

fn from_search_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return None;
    }

    PATH_COMMANDS.iter().find_map(|cmd| {
        let output = Command::new("which").arg(cmd).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if found.is_empty() {
            return None;
        }
        info!("Found browser with `which {cmd}`: {found}");
        Some(PathBuf::from(found))
    })
}

/// Find an installed Chrome or Chromium
///
/// # Errors
///
/// Fails when no executable is found by any lookup.
pub fn find_browser_executable() -> Result<PathBuf> {
    from_env()
        .or_else(from_install_locations)
        .or_else(from_search_path)
        .ok_or_else(|| anyhow!("Chrome/Chromium executable not found"))
}

/// Fetch a managed Chromium into `<cache>/veo_video_url/chromium`
///
/// # Errors
///
/// Fails when the cache directory cannot be created or the download fails.
pub async fn download_managed_browser() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(env!("CARGO_PKG_NAME"))
        .join("chromium");
    tokio::fs::create_dir_all(&cache_dir)
        .await
        .with_context(|| format!("Failed to create browser cache {}", cache_dir.display()))?;

    info!("No local browser found, fetching Chromium into {}", cache_dir.display());
    let options = BrowserFetcherOptions::builder()
        .with_path(&cache_dir)
        .build()
        .context("Failed to build fetcher options")?;
    let revision = BrowserFetcher::new(options)
        .fetch()
        .await
        .context("Failed to fetch Chromium")?;

    info!("Chromium ready at {}", revision.folder_path.display());
    Ok(revision.executable_path)
}

/// Per-process profile directory used when none is configured
#[must_use]
pub fn default_profile_dir() -> PathBuf {
    std::env::temp_dir().join(format!("veo_video_url_chrome_{}", std::process::id()))
}

/// Handler errors chromiumoxide raises for CDP events it cannot decode
fn is_benign_handler_error(message: &str) -> bool {
    message.contains("data did not match any variant of untagged enum Message")
        || message.contains("Failed to deserialize WS response")
}

/// Drive the CDP connection until the browser goes away
fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            let Err(e) = event else { continue };
            let message = e.to_string();
            if is_benign_handler_error(&message) {
                trace!("Ignoring undecodable CDP message: {message}");
            } else {
                error!("Browser handler error: {e:?}");
            }
        }
        debug!("Browser handler finished");
    })
}

fn browser_config(executable: PathBuf, profile: &Path, headless: bool) -> Result<chromiumoxide::BrowserConfig> {
    let mut builder = BrowserConfigBuilder::default()
        .chrome_executable(executable)
        .user_data_dir(profile)
        .window_size(1920, 1080)
        .request_timeout(Duration::from_secs(30))
        .arg(format!("--user-agent={CHROME_USER_AGENT}"));

    builder = if headless {
        builder.headless_mode(HeadlessMode::New)
    } else {
        builder.with_head()
    };

    builder = STEALTH_ARGS
        .iter()
        .chain(RUNTIME_ARGS)
        .fold(builder, |b, flag| b.arg(*flag));

    builder
        .build()
        .map_err(|e| anyhow!("Failed to build browser config: {e}"))
}

/// Launch Chrome and spawn its CDP handler
///
/// Returns the browser, the handler task and the profile directory. The
/// handler must be aborted only after the browser is closed.
///
/// # Errors
///
/// Fails when no browser can be found or downloaded, the profile directory
/// cannot be created, or Chrome does not start.
pub async fn launch_browser(
    headless: bool,
    chrome_data_dir: Option<PathBuf>,
) -> Result<(Browser, JoinHandle<()>, PathBuf)> {
    let executable = match find_browser_executable() {
        Ok(path) => path,
        Err(e) => {
            warn!("{e}");
            download_managed_browser().await?
        }
    };

    let profile = chrome_data_dir.unwrap_or_else(default_profile_dir);
    std::fs::create_dir_all(&profile)
        .with_context(|| format!("Failed to create Chrome profile {}", profile.display()))?;

    let config = browser_config(executable, &profile, headless)?;

    info!("Launching browser (headless: {headless})");
    let (browser, handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;

    Ok((browser, spawn_handler(handler), profile))
}
