//! HTTP client for the account balance API.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Balance query endpoint, authorized with a bearer key.
const BALANCE_API_URL: &str = "https://api.deepseek.com/v1/user/balance";

/// Balance details for a single currency.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceReport {
    #[serde(default = "default_amount")]
    pub total_balance: String,
    #[serde(default = "default_amount")]
    pub granted_balance: String,
    #[serde(default = "default_amount")]
    pub topped_up_balance: String,
}

fn default_amount() -> String {
    "0.00".to_string()
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    is_available: bool,
    #[serde(default)]
    balance_infos: Vec<BalanceReport>,
}

/// Queries the balance API, returning `None` on any failure.
///
/// The report omits its balance section when this returns `None`; the
/// run itself continues either way.
pub fn fetch_balance(agent: &ureq::Agent, api_key: &str) -> Option<BalanceReport> {
    match fetch_balance_inner(agent, api_key) {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("Balance query failed: {e:#}");
            None
        }
    }
}

fn fetch_balance_inner(agent: &ureq::Agent, api_key: &str) -> Result<BalanceReport> {
    let body = agent
        .get(BALANCE_API_URL)
        .header("Authorization", &format!("Bearer {}", api_key))
        .call()
        .context("Failed to fetch balance data")?
        .body_mut()
        .read_to_string()
        .context("Failed to read balance response")?;

    parse_balance(&body)
}

/// Parses a balance response body. Only the first balance entry is used.
fn parse_balance(body: &str) -> Result<BalanceReport> {
    let response: BalanceResponse =
        serde_json::from_str(body).context("Failed to parse balance response")?;

    if !response.is_available {
        bail!("Balance information is not available");
    }

    response
        .balance_infos
        .into_iter()
        .next()
        .context("Balance response contained no entries")
}
