//! Notification fan-out to the configured sinks.
//!
//! Both sinks are always attempted; one failing never prevents the
//! other from being tried.

pub mod serverchan;
pub mod telegram;

use crate::config::Config;
use crate::message::Notification;

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// The sink accepted the message.
    Sent,
    /// Credentials are not configured; no network call was made.
    Skipped,
    /// The delivery was attempted and failed.
    Failed(String),
}

/// Per-sink outcomes for one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub push: SinkOutcome,
    pub bot: SinkOutcome,
}

/// Delivers the notification to every configured sink.
pub fn dispatch_all(
    agent: &ureq::Agent,
    config: &Config,
    notification: &Notification,
) -> DispatchSummary {
    DispatchSummary {
        push: serverchan::send(agent, config.serverchan.as_ref(), notification),
        bot: telegram::send(agent, config.telegram.as_ref(), notification),
    }
}
