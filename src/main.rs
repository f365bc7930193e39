// Batch extractor for Veo match-page video URLs.
//
// Reads match-page URLs from a text file, drives one headless Chrome tab
// through them and writes a CSV of the direct video file URLs found.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use veo_video_url::utils::{
    DEFAULT_INPUT_FILE, DEFAULT_LOG_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
    DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_REQUEST_DELAY_SECS, DEFAULT_SETTLE_DELAY_SECS,
};
use veo_video_url::{CancelSignal, ScrapeConfig, logging, run_batch};

#[derive(Parser, Debug)]
#[command(name = "veo-video-url")]
#[command(about = "Extract direct video file URLs from Veo match pages", long_about = None)]
struct Args {
    /// Text file with one match-page URL per line
    #[arg(long, default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// CSV report destination
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Directory for the per-run log file
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,

    /// Write each page's rendered HTML here (overwritten per page)
    #[arg(long)]
    debug_html: Option<PathBuf>,

    /// Seconds to wait between URLs
    #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY_SECS)]
    delay: u64,

    /// Seconds to let page scripts run after navigation
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY_SECS)]
    settle: u64,

    /// Seconds to wait for each readiness selector
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    probe_timeout: u64,

    /// Seconds allowed for a page navigation
    #[arg(long, default_value_t = DEFAULT_PAGE_LOAD_TIMEOUT_SECS)]
    page_timeout: u64,

    /// Show the browser window (debug builds only)
    #[arg(long)]
    headed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<ScrapeConfig> {
        let mut builder = ScrapeConfig::builder()
            .input_file(self.input)
            .output_file(self.output)
            .log_dir(self.log_dir)
            .headless(!self.headed)
            .request_delay(Duration::from_secs(self.delay))
            .settle_delay(Duration::from_secs(self.settle))
            .probe_timeout(Duration::from_secs(self.probe_timeout))
            .page_load_timeout(Duration::from_secs(self.page_timeout));

        if let Some(path) = self.debug_html {
            builder = builder.debug_html_file(path);
        }

        builder.build()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = logging::init(&args.log_dir, args.verbose)?;
    info!("Logging to {}", log_path.display());

    let config = args.into_config().context("Invalid configuration")?;

    let (cancel_handle, cancel) = CancelSignal::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing up");
            cancel_handle.cancel();
        }
    });

    match run_batch(&config, &cancel).await {
        Ok(report) => {
            info!(
                "Run finished ({:?}): {} succeeded, {} failed",
                report.termination,
                report.success_count(),
                report.failed_count()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
