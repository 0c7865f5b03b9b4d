//! Screenshot capture
//!
//! PNG viewport captures feed the per-action trail and the failure artifact.

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use tracing::debug;

use crate::error::{CaptureError, Result};

/// Capture the page's current viewport as PNG bytes
pub async fn capture_png(page: &Page) -> Result<Vec<u8>> {
    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .from_surface(true)
        .build();

    let data = page
        .screenshot(params)
        .await
        .map_err(|e| CaptureError::ScreenshotFailed(e.to_string()))?;

    debug!("Screenshot captured: {} bytes", data.len());
    Ok(data)
}
