//! Page preparation before the first navigation

use anyhow::Result;
use chromiumoxide::{Page, cdp};

/// Apply stealth evasions and a desktop viewport to a blank page
///
/// Evasions are registered for new documents, so this must run while the
/// page is still on `about:blank`.
pub async fn enhance_page(page: &Page) -> Result<()> {
    match crate::stealth::inject(page).await {
        Ok(()) => log::debug!("Stealth evasions injected"),
        // A page without evasions still renders; keep going
        Err(e) => log::warn!("Failed to inject stealth evasions: {e}"),
    }

    // Same 1920x1080 viewport the browser window is launched with
    page.execute(
        cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams::builder()
            .width(1920)
            .height(1080)
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(anyhow::Error::msg)?,
    )
    .await?;

    Ok(())
}
