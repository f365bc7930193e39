//! `PageSession` backed by a chromiumoxide browser
//!
//! Owns the browser process, its CDP handler task, a single tab and the
//! Chrome profile directory for the lifetime of a run.

use anyhow::Context;
use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use chromiumoxide::error::CdpError;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use super::PageSession;
use super::cleanup::{CleanupResult, cleanup_browser_and_data};
use super::enhancer::enhance_page;
use crate::browser_setup::launch_browser;
use crate::config::ScrapeConfig;
use crate::errors::{SessionError, SessionResult};

/// Map a CDP error onto the session error taxonomy
///
/// A dead browser shows up as a websocket failure, a closed command
/// channel, a request that never got an answer, or Chrome reporting the
/// target as closed. Everything else fails only the current call.
pub(crate) fn classify_cdp_error(err: &CdpError) -> SessionError {
    let msg = err.to_string();
    match err {
        CdpError::Ws(_) | CdpError::ChannelSendError(_) | CdpError::NoResponse => {
            SessionError::Disconnected(msg)
        }
        CdpError::Chrome(e) if e.message.contains("Target closed") => {
            SessionError::Disconnected(msg)
        }
        _ => SessionError::Protocol(msg),
    }
}

pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    user_data_dir: Option<PathBuf>,
    poll_interval: Duration,
}

impl ChromiumSession {
    /// Launch Chrome, open a blank tab and apply stealth evasions
    pub async fn launch(config: &ScrapeConfig) -> anyhow::Result<Self> {
        let (mut browser, handler, user_data_dir) =
            launch_browser(config.headless(), config.chrome_data_dir().cloned()).await?;

        let page = match browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")
        {
            Ok(page) => page,
            Err(e) => {
                cleanup_browser_and_data(&mut browser, Some(&user_data_dir)).await;
                handler.abort();
                return Err(e);
            }
        };

        // Evasions register for new documents, so this happens before any goto
        if let Err(e) = enhance_page(&page).await {
            warn!("Failed to apply page enhancements: {e}");
        }

        info!("Browser session ready");
        Ok(Self {
            browser,
            handler,
            page,
            user_data_dir: Some(user_data_dir),
            poll_interval: config.poll_interval(),
        })
    }
}

impl PageSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> SessionResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| match classify_cdp_error(&e) {
                SessionError::Protocol(msg) => SessionError::Navigation(msg),
                other => other,
            })?;

        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| classify_cdp_error(&e))?;

        Ok(())
    }

    async fn current_markup(&self) -> SessionResult<String> {
        self.page
            .content()
            .await
            .map_err(|e| classify_cdp_error(&e))
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> SessionResult<bool> {
        let start = Instant::now();

        loop {
            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Ok(false);
            }

            // A single find_element can stall on a busy renderer; bound it too
            match tokio::time::timeout(remaining, self.page.find_element(selector)).await {
                Ok(Ok(_)) => {
                    debug!("Selector {selector} present after {:?}", start.elapsed());
                    return Ok(true);
                }
                Ok(Err(e)) => {
                    let err = classify_cdp_error(&e);
                    if err.is_fatal() {
                        return Err(err);
                    }
                    trace!("Selector {selector} not present yet: {e}");
                }
                Err(_) => return Ok(false),
            }

            tokio::time::sleep(self.poll_interval.min(timeout.saturating_sub(start.elapsed())))
                .await;
        }
    }

    async fn close(mut self) -> SessionResult<()> {
        if let Err(e) = self.page.clone().close().await {
            debug!("Failed to close tab before browser shutdown: {e}");
        }

        let data_dir = self.user_data_dir.take();
        let result = cleanup_browser_and_data(&mut self.browser, data_dir.as_deref()).await;

        // The handler must outlive browser.close() so the close command gets through
        self.handler.abort();
        info!("Browser session closed");

        match result {
            CleanupResult::Success => Ok(()),
            CleanupResult::PartialFailure(errors) => {
                Err(SessionError::Protocol(errors.join("; ")))
            }
        }
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler.abort();

        // Only reached when close() was never called
        if let Some(dir) = self.user_data_dir.take() {
            warn!("ChromiumSession dropped without close - removing profile in Drop");
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!(
                    "Failed to clean up Chrome profile {}: {e}. Manual cleanup may be required.",
                    dir.display()
                );
            }
        }
    }
}
