//! HTTP client for the bandwidth usage API.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Usage counters as reported by the API.
///
/// Absent fields fall back to their defaults; a field that is present
/// with the wrong type is a processing error surfaced to the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUsage {
    /// Monthly bandwidth limit in bytes.
    #[serde(rename = "monthly_bw_limit_b", default)]
    pub limit_bytes: u64,
    /// Bandwidth consumed so far this cycle, in bytes.
    #[serde(rename = "bw_counter_b", default)]
    pub used_bytes: u64,
    /// Day of month on which the counter is zeroed.
    #[serde(rename = "bw_reset_day_of_month", default = "default_reset_day")]
    pub reset_day: u32,
}

fn default_reset_day() -> u32 {
    1
}

impl RawUsage {
    /// Extracts the usage counters from a usage API response body.
    pub fn from_json(body: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(body.clone()).context("Failed to extract usage fields")
    }
}

/// Fetches the usage endpoint and returns the parsed JSON body.
///
/// Never propagates an error: any non-200 status, transport failure or
/// unparseable body is logged and reported as `None`, and the caller
/// degrades to a failure notification.
pub fn fetch_usage(agent: &ureq::Agent, url: &str) -> Option<serde_json::Value> {
    match fetch_usage_inner(agent, url) {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("Usage API request failed: {e:#}");
            None
        }
    }
}

fn fetch_usage_inner(agent: &ureq::Agent, url: &str) -> Result<serde_json::Value> {
    let body = agent
        .get(url)
        .call()
        .context("Failed to fetch usage data")?
        .body_mut()
        .read_to_string()
        .context("Failed to read usage response")?;

    serde_json::from_str(&body).context("Failed to parse usage response")
}
