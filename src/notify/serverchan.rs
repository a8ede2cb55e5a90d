//! ServerChan-style push webhook sink.

use crate::config::ServerChanCredentials;
use crate::message::Notification;
use crate::notify::SinkOutcome;
use anyhow::{bail, Context, Result};
use tracing::{info, warn};

/// Builds the per-account send URL from the credential pair.
fn push_url(creds: &ServerChanCredentials) -> String {
    format!(
        "https://{}.push.ft07.com/send/{}.send",
        creds.uid, creds.send_key
    )
}

/// Sends the notification through the push webhook.
///
/// Missing credentials short-circuit to `Skipped` without a network
/// call; delivery failures are logged and never propagate.
pub fn send(
    agent: &ureq::Agent,
    creds: Option<&ServerChanCredentials>,
    notification: &Notification,
) -> SinkOutcome {
    let Some(creds) = creds else {
        info!("ServerChan credentials not set, skipping push notification");
        return SinkOutcome::Skipped;
    };

    match send_inner(agent, &push_url(creds), notification) {
        Ok(()) => {
            info!("Push notification sent");
            SinkOutcome::Sent
        }
        Err(e) => {
            warn!("Push notification failed: {e:#}");
            SinkOutcome::Failed(format!("{e:#}"))
        }
    }
}

fn send_inner(agent: &ureq::Agent, url: &str, notification: &Notification) -> Result<()> {
    let mut form = vec![
        ("title", notification.title.as_str()),
        ("desp", notification.body.as_str()),
    ];
    if let Some(tag) = notification.tag.as_deref() {
        form.push(("tags", tag));
    }
    if let Some(short) = notification.short.as_deref() {
        form.push(("short", short));
    }

    let body = agent
        .post(url)
        .send_form(form)
        .context("Failed to post push notification")?
        .body_mut()
        .read_to_string()
        .context("Failed to read push response")?;

    verify_response(&body)
}

/// A 200 response still carries an application-level result; `code`
/// must be zero for the message to count as delivered.
fn verify_response(body: &str) -> Result<()> {
    let response: serde_json::Value =
        serde_json::from_str(body).context("Failed to parse push response")?;

    let code = response["code"]
        .as_i64()
        .context("Missing `code` in push response")?;
    if code != 0 {
        let message = response["message"].as_str().unwrap_or("unknown error");
        bail!("Push service rejected the message (code {}): {}", code, message);
    }

    Ok(())
}
