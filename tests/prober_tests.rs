//! Readiness prober behaviour against scripted sessions

use std::time::Duration;
use tokio::time::Instant;

use veo_video_url::{
    PageSession, ProbeConfig, ProbeOutcome, ReadinessCheck, ReadinessProber, SessionError,
    SessionResult,
};

mod common;
use common::{MockPage, MockSession, fast_probe_config};

const PAGE: &str = "https://app.veo.co/matches/probe/";

async fn navigated(page: MockPage) -> MockSession {
    let session = MockSession::new([(PAGE.to_string(), page)]);
    session.navigate(PAGE).await.unwrap();
    session
}

#[tokio::test(start_paused = true)]
async fn player_container_short_circuits() {
    let session =
        navigated(MockPage::new("").with_selector(r#"div[data-cy="match-page-player-container"]"#))
            .await;
    let start = Instant::now();

    let outcome = ReadinessProber::new(fast_probe_config())
        .probe(&session)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ProbeOutcome::Found {
            selector: r#"div[data-cy="match-page-player-container"]"#.into()
        }
    );
    assert_eq!(session.selector_queries().len(), 1);
    assert!(start.elapsed() < Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn later_selector_found_after_earlier_one_times_out() {
    let session = navigated(MockPage::new("").with_selector("video")).await;
    let start = Instant::now();

    let outcome = ReadinessProber::new(fast_probe_config())
        .probe(&session)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ProbeOutcome::Found {
            selector: "video".into()
        }
    );
    // Nothing after the matching selector is queried
    assert_eq!(
        session.selector_queries(),
        vec![
            r#"div[data-cy="match-page-player-container"]"#.to_string(),
            "video".to_string()
        ]
    );
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn nothing_found_is_not_an_error() {
    let session = navigated(MockPage::new("<html></html>")).await;
    let start = Instant::now();

    let outcome = ReadinessProber::new(fast_probe_config())
        .probe(&session)
        .await
        .unwrap();

    assert_eq!(outcome, ProbeOutcome::NotFound);
    assert!(!outcome.is_found());
    assert_eq!(
        session.selector_queries(),
        ProbeConfig::DEFAULT_SELECTORS
            .iter()
            .map(|s| (*s).to_string())
            .collect::<Vec<_>>()
    );
    assert!(start.elapsed() >= Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn each_check_uses_its_own_timeout() {
    let session = navigated(MockPage::new("")).await;
    let probe = ProbeConfig::new(vec![
        ReadinessCheck::new(".scoreboard", Duration::from_secs(2)),
        ReadinessCheck::new(".timeline", Duration::from_secs(7)),
    ]);
    let start = Instant::now();

    let outcome = ReadinessProber::new(probe).probe(&session).await.unwrap();

    assert_eq!(outcome, ProbeOutcome::NotFound);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(9), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(10), "elapsed {elapsed:?}");
}

/// A session whose browser has died
struct DeadSession;

impl PageSession for DeadSession {
    async fn navigate(&self, _url: &str) -> SessionResult<()> {
        Ok(())
    }

    async fn current_markup(&self) -> SessionResult<String> {
        Ok(String::new())
    }

    async fn wait_for_selector(&self, _selector: &str, _timeout: Duration) -> SessionResult<bool> {
        Err(SessionError::Disconnected("browser process exited".into()))
    }

    async fn close(self) -> SessionResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn session_fault_propagates() {
    let err = ReadinessProber::new(ProbeConfig::default())
        .probe(&DeadSession)
        .await
        .unwrap_err();

    assert!(err.is_fatal());
}
