pub mod browser_setup;
pub mod cancel;
pub mod config;
pub mod errors;
pub mod logging;
pub mod prober;
pub mod report;
pub mod resolver;
pub mod runner;
pub mod session;
pub mod stealth;
pub mod targets;
pub mod utils;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use cancel::{CancelHandle, CancelSignal};
pub use config::{
    ExtractionRule, ProbeConfig, ReadinessCheck, ResolverConfig, RunnerConfig, ScrapeConfig,
};
pub use errors::{ExtractError, ExtractResult, SessionError, SessionResult};
pub use prober::{ProbeOutcome, ReadinessProber};
pub use report::{BatchReport, BatchTermination, ExtractionOutcome, OutcomeStatus, write_csv};
pub use resolver::{PatternResolver, Resolution};
pub use runner::{BatchRunner, finish_batch, run_batch};
pub use session::{ChromiumSession, PageSession};
pub use targets::{Target, parse_targets, read_targets};
