//! Anti-automation evasions injected into every new document
//!
//! The match pages gate their player behind basic bot checks
//! (`navigator.webdriver`, empty plugin list, headless UA). The scripts in
//! `evasions/` patch those before any page script runs.

use anyhow::Result;
use chromiumoxide::{Page, cdp};
use futures::future::join_all;
use tracing::{debug, warn};

mod config;
pub use config::StealthConfig;

// Injected in this order; later scripts read window.__stealthConfig
const EVASION_SCRIPTS: &[(&str, &str)] = &[
    (
        "navigator_webdriver",
        include_str!("evasions/navigator_webdriver.js"),
    ),
    (
        "navigator_languages",
        include_str!("evasions/navigator_languages.js"),
    ),
    (
        "navigator_plugins",
        include_str!("evasions/navigator_plugins.js"),
    ),
    (
        "hardware_concurrency",
        include_str!("evasions/hardware_concurrency.js"),
    ),
    ("webgl_vendor", include_str!("evasions/webgl_vendor.js")),
    ("chrome_runtime", include_str!("evasions/chrome_runtime.js")),
];

/// Script defining `window.__stealthConfig` from `config`
#[must_use]
pub fn config_script(config: &StealthConfig) -> String {
    let json = serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string());
    format!("window.__stealthConfig = {json};")
}

fn on_new_document(source: String) -> cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams {
    cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams {
        source,
        include_command_line_api: None,
        world_name: None,
        run_immediately: None,
    }
}

/// Register all evasions on `page` and strip "Headless" from its user agent
///
/// Best effort: individual script failures are logged, and only a page
/// where no script could be registered is reported as an error.
pub async fn inject(page: &Page) -> Result<()> {
    let config = StealthConfig::default();

    // The config object must exist before any evasion reads it
    page.execute(on_new_document(config_script(&config))).await?;

    let inject_futures: Vec<_> = EVASION_SCRIPTS
        .iter()
        .map(|(name, source)| {
            let page = page.clone();
            async move {
                let result = page.execute(on_new_document((*source).to_string())).await;
                (*name, result)
            }
        })
        .collect();

    let mut injected = 0;
    for (name, result) in join_all(inject_futures).await {
        match result {
            Ok(_) => {
                debug!("Injected evasion: {name}");
                injected += 1;
            }
            Err(e) => warn!("Failed to inject evasion {name}: {e}"),
        }
    }

    if injected == 0 {
        return Err(anyhow::anyhow!(
            "Failed to inject any of {} evasion scripts",
            EVASION_SCRIPTS.len()
        ));
    }

    let version = page
        .execute(cdp::browser_protocol::browser::GetVersionParams {})
        .await?;
    let user_agent = version.user_agent.replace("Headless", "");

    page.execute(cdp::browser_protocol::network::SetUserAgentOverrideParams {
        user_agent,
        accept_language: Some(config.accept_language.clone()),
        platform: Some(config.platform.clone()),
        user_agent_metadata: None,
    })
    .await?;

    debug!(
        "Stealth injection complete: {injected}/{} scripts active",
        EVASION_SCRIPTS.len()
    );
    Ok(())
}
