//! Status page retrieval
//!
//! One blocking GET per invocation, no retries: a modem that cannot be
//! reached surfaces as UNKNOWN through the caller's error mapping.

use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Per-channel signal metrics page
pub const SIGNAL_PAGE: &str = "cmSignalData.htm";

/// Overall status page
pub const STATUS_PAGE: &str = "indexData.htm";

/// Fetch one of the modem's embedded status pages and return the raw HTML.
pub fn fetch_page(address: &str, page: &str, timeout: Duration) -> Result<String> {
    let url = format!("http://{}/{}", address, page);
    log::info!("Fetching {}", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .get(&url)
        .send()
        .with_context(|| format!("failed to reach modem at {}", url))?;

    if !response.status().is_success() {
        bail!("modem returned HTTP {} for {}", response.status(), url);
    }

    let body = response
        .text()
        .with_context(|| format!("failed to read response body from {}", url))?;
    log::debug!("Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
