//! The fetch, compute, format, notify pipeline for a single check run.

use crate::balance_api;
use crate::config::Config;
use crate::http;
use crate::message::{self, Notification};
use crate::notify::{self, DispatchSummary, SinkOutcome};
use crate::report::UsageReport;
use crate::usage_api::{self, RawUsage};
use chrono::Local;
use tracing::info;

/// Runs one complete check and returns the per-sink outcomes.
///
/// Nothing here is fatal: every fetch or processing failure degrades
/// into a notification describing it, and a sink failure never affects
/// the other sink.
pub fn run_check(config: &Config, dry_run: bool) -> DispatchSummary {
    let agent = http::agent();
    info!("Checking bandwidth usage");

    let notification = build_notification(&agent, config);
    info!("{}", notification.title);
    info!("{}", notification.body);

    if dry_run {
        info!("Dry run, skipping notification delivery");
        return DispatchSummary {
            push: SinkOutcome::Skipped,
            bot: SinkOutcome::Skipped,
        };
    }

    let summary = notify::dispatch_all(&agent, config, &notification);
    info!(
        "Delivery outcome: push {:?}, bot {:?}",
        summary.push, summary.bot
    );
    summary
}

/// Fetches usage (and optionally balance) and renders the notification.
fn build_notification(agent: &ureq::Agent, config: &Config) -> Notification {
    let Some(body) = usage_api::fetch_usage(agent, &config.usage_api_url) else {
        return message::fetch_failure_notification();
    };

    match RawUsage::from_json(&body) {
        Ok(raw) => {
            let report = UsageReport::compute(&raw, Local::now().naive_local());
            let balance = config
                .balance_api_key
                .as_deref()
                .and_then(|key| balance_api::fetch_balance(agent, key));
            message::usage_notification(&report, balance.as_ref())
        }
        Err(e) => message::processing_error_notification(&e, &body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so the fetch fails fast
    // without leaving the machine.
    fn unreachable_config() -> Config {
        Config {
            usage_api_url: "http://127.0.0.1:9/usage".to_string(),
            serverchan: None,
            telegram: None,
            balance_api_key: None,
        }
    }

    #[test]
    fn test_fetch_failure_yields_fixed_failure_notification() {
        let agent = http::agent();
        let notification = build_notification(&agent, &unreachable_config());
        assert_eq!(notification.title, "Bandwidth check failed");
        assert!(notification.body.contains("Could not fetch usage data"));
    }

    #[test]
    fn test_failed_fetch_still_reaches_both_sinks() {
        // With no credentials configured both sinks are consulted and
        // report a skip rather than an error.
        let summary = run_check(&unreachable_config(), false);
        assert_eq!(summary.push, SinkOutcome::Skipped);
        assert_eq!(summary.bot, SinkOutcome::Skipped);
    }

    #[test]
    fn test_dry_run_skips_delivery() {
        let summary = run_check(&unreachable_config(), true);
        assert_eq!(summary.push, SinkOutcome::Skipped);
        assert_eq!(summary.bot, SinkOutcome::Skipped);
    }
}
