//! Test utilities shared by the integration tests
//!
//! `MockSession` is a scripted `PageSession`: each URL maps to a fake page
//! with fixed markup and a set of selectors that are "present". Selectors
//! that are absent make `wait_for_selector` sleep for the full timeout, so
//! tests run under paused tokio time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use veo_video_url::{
    CancelHandle, PageSession, ProbeConfig, ReadinessCheck, RunnerConfig, SessionError,
    SessionResult, Target,
};

pub const MATCH_UUID: &str = "3f2b9c1e-8a4d-4e6f-9b21-0c5d7e8f9a10";

/// A direct CDN asset URL as it appears on a rendered match page
#[allow(dead_code)]
pub fn asset_url(id: &str) -> String {
    format!("https://c.veocdn.com/{MATCH_UUID}/standard/machine/{id}/video.mp4")
}

/// Minimal match page embedding `video_url` in a `<video>` element
#[allow(dead_code)]
pub fn match_page(video_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <div data-cy="match-page-player-container">
    <video preload="metadata"><source src="{video_url}" type="video/mp4"></video>
  </div>
</body>
</html>"#
    )
}

#[allow(dead_code)]
pub fn target(url: &str) -> Target {
    Target::parse(url).unwrap()
}

#[allow(dead_code)]
pub fn targets(count: usize) -> Vec<Target> {
    (1..=count)
        .map(|i| target(&format!("https://app.veo.co/matches/match-{i}/")))
        .collect()
}

/// Runner timings small enough to reason about in paused-time tests
#[allow(dead_code)]
pub fn fast_runner_config() -> RunnerConfig {
    RunnerConfig {
        settle_delay: Duration::from_millis(100),
        request_delay: Duration::from_millis(200),
        page_load_timeout: Duration::from_secs(5),
        debug_html_file: None,
    }
}

#[allow(dead_code)]
pub fn fast_probe_config() -> ProbeConfig {
    ProbeConfig::with_timeout(Duration::from_secs(1))
}

#[allow(dead_code)]
pub fn single_check(selector: &str, timeout: Duration) -> ProbeConfig {
    ProbeConfig::new(vec![ReadinessCheck::new(selector, timeout)])
}

/// Scripted behaviour for one URL
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    markup: String,
    selectors: Vec<String>,
    navigate_delay: Duration,
    navigate_error: Option<SessionError>,
    markup_error: Option<SessionError>,
}

#[allow(dead_code)]
impl MockPage {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            ..Self::default()
        }
    }

    pub fn with_selector(mut self, selector: &str) -> Self {
        self.selectors.push(selector.to_string());
        self
    }

    pub fn navigate_delay(mut self, delay: Duration) -> Self {
        self.navigate_delay = delay;
        self
    }

    pub fn navigate_error(mut self, err: SessionError) -> Self {
        self.navigate_error = Some(err);
        self
    }

    pub fn markup_error(mut self, err: SessionError) -> Self {
        self.markup_error = Some(err);
        self
    }
}

#[derive(Default)]
struct MockState {
    pages: HashMap<String, MockPage>,
    current: Mutex<Option<String>>,
    navigations: Mutex<Vec<String>>,
    selector_queries: Mutex<Vec<String>>,
    cancel_on: Mutex<Option<(String, CancelHandle)>>,
    closes: AtomicUsize,
}

/// Cloneable handle onto shared scripted state
///
/// `close` consumes one clone; keep another to inspect the state afterwards.
#[derive(Clone, Default)]
pub struct MockSession {
    state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockSession {
    pub fn new(pages: impl IntoIterator<Item = (String, MockPage)>) -> Self {
        Self {
            state: Arc::new(MockState {
                pages: pages.into_iter().collect(),
                ..MockState::default()
            }),
        }
    }

    /// Fire `handle` when `url` is navigated to
    pub fn cancel_on_navigate(&self, url: &str, handle: CancelHandle) {
        *self.state.cancel_on.lock().unwrap() = Some((url.to_string(), handle));
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.navigations.lock().unwrap().clone()
    }

    pub fn selector_queries(&self) -> Vec<String> {
        self.state.selector_queries.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }

    fn current_page(&self) -> Option<MockPage> {
        let current = self.state.current.lock().unwrap().clone()?;
        self.state.pages.get(&current).cloned()
    }
}

impl PageSession for MockSession {
    async fn navigate(&self, url: &str) -> SessionResult<()> {
        self.state.navigations.lock().unwrap().push(url.to_string());
        *self.state.current.lock().unwrap() = Some(url.to_string());

        let fire = {
            let cancel_on = self.state.cancel_on.lock().unwrap();
            match cancel_on.as_ref() {
                Some((trigger, handle)) if trigger == url => Some(handle.clone()),
                _ => None,
            }
        };
        if let Some(handle) = fire {
            handle.cancel();
        }

        let page = self.state.pages.get(url).cloned().unwrap_or_default();
        if !page.navigate_delay.is_zero() {
            tokio::time::sleep(page.navigate_delay).await;
        }
        match page.navigate_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn current_markup(&self) -> SessionResult<String> {
        let page = self.current_page().unwrap_or_default();
        match page.markup_error {
            Some(err) => Err(err),
            None => Ok(page.markup),
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> SessionResult<bool> {
        self.state
            .selector_queries
            .lock()
            .unwrap()
            .push(selector.to_string());

        let present = self
            .current_page()
            .is_some_and(|page| page.selectors.iter().any(|s| s == selector));
        if present {
            return Ok(true);
        }

        tokio::time::sleep(timeout).await;
        Ok(false)
    }

    async fn close(self) -> SessionResult<()> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
