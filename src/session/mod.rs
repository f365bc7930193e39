//! Page session abstraction
//!
//! The prober and the runner only talk to a browser through `PageSession`,
//! so the extraction loop can run against Chrome in production and against
//! a scripted fake in tests.

use std::future::Future;
use std::time::Duration;

use crate::errors::SessionResult;

pub mod chromium;
pub mod cleanup;
pub mod enhancer;
pub mod timeout;

pub use chromium::ChromiumSession;
pub use timeout::with_timeout;

/// A single live, navigable browser tab
///
/// One session is reused for every target in a run. It is released by
/// `close`, which consumes it so a closed session cannot be used again.
pub trait PageSession {
    /// Load `url` in the tab and wait for the navigation to commit
    fn navigate(&self, url: &str) -> impl Future<Output = SessionResult<()>> + Send;

    /// Rendered document markup as the page currently exposes it
    fn current_markup(&self) -> impl Future<Output = SessionResult<String>> + Send;

    /// Wait up to `timeout` for any element matching `selector`
    ///
    /// Returns `Ok(false)` when the wait runs out; errors are reserved for
    /// faults of the session itself.
    fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> impl Future<Output = SessionResult<bool>> + Send;

    /// Release the browser session
    fn close(self) -> impl Future<Output = SessionResult<()>> + Send
    where
        Self: Sized;
}
