//! Environment-sourced configuration, read once at startup.

use anyhow::{bail, Result};

/// Push webhook credential pair. The account id and send key together
/// form the per-account send URL.
#[derive(Debug, Clone)]
pub struct ServerChanCredentials {
    pub uid: String,
    pub send_key: String,
}

/// Bot messaging credential pair.
#[derive(Debug, Clone)]
pub struct TelegramCredentials {
    pub bot_token: String,
    pub chat_id: String,
}

/// Runtime configuration for a single check run.
///
/// Only the usage endpoint is required. A sink whose credentials are
/// missing is skipped at dispatch time without a network call.
#[derive(Debug, Clone)]
pub struct Config {
    pub usage_api_url: String,
    pub serverchan: Option<ServerChanCredentials>,
    pub telegram: Option<TelegramCredentials>,
    pub balance_api_key: Option<String>,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `USAGE_API_URL` is unset or empty.
    pub fn from_env() -> Result<Self> {
        let Some(usage_api_url) = env_non_empty("USAGE_API_URL") else {
            bail!("USAGE_API_URL environment variable is not set");
        };

        let serverchan = match (
            env_non_empty("SERVERCHAN_UID"),
            env_non_empty("SERVERCHAN_SENDKEY"),
        ) {
            (Some(uid), Some(send_key)) => Some(ServerChanCredentials { uid, send_key }),
            _ => None,
        };

        let telegram = match (
            env_non_empty("TELEGRAM_BOT_TOKEN"),
            env_non_empty("TELEGRAM_CHAT_ID"),
        ) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramCredentials { bot_token, chat_id }),
            _ => None,
        };

        Ok(Self {
            usage_api_url,
            serverchan,
            telegram,
            balance_api_key: env_non_empty("BALANCE_API_KEY"),
        })
    }
}

/// Reads an environment variable, treating empty values as unset.
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
