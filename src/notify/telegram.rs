//! Telegram bot messaging sink.

use crate::config::TelegramCredentials;
use crate::message::Notification;
use crate::notify::SinkOutcome;
use anyhow::{Context, Result};
use tracing::{info, warn};

fn send_message_url(bot_token: &str) -> String {
    format!("https://api.telegram.org/bot{}/sendMessage", bot_token)
}

/// Sends the notification through the bot API as one markdown message.
///
/// Missing credentials short-circuit to `Skipped` without a network
/// call; delivery failures are logged and never propagate.
pub fn send(
    agent: &ureq::Agent,
    creds: Option<&TelegramCredentials>,
    notification: &Notification,
) -> SinkOutcome {
    let Some(creds) = creds else {
        info!("Telegram credentials not set, skipping bot notification");
        return SinkOutcome::Skipped;
    };

    match send_inner(agent, creds, notification) {
        Ok(()) => {
            info!("Telegram notification sent");
            SinkOutcome::Sent
        }
        Err(e) => {
            warn!("Telegram notification failed: {e:#}");
            SinkOutcome::Failed(format!("{e:#}"))
        }
    }
}

fn send_inner(
    agent: &ureq::Agent,
    creds: &TelegramCredentials,
    notification: &Notification,
) -> Result<()> {
    let url = send_message_url(&creds.bot_token);
    let text = format!("*{}*\n\n{}", notification.title, notification.body);

    agent
        .post(url.as_str())
        .send_form([
            ("chat_id", creds.chat_id.as_str()),
            ("text", text.as_str()),
            ("parse_mode", "Markdown"),
        ])
        .context("Failed to post bot message")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http;

    #[test]
    fn test_send_message_url_embeds_token() {
        assert_eq!(
            send_message_url("123:abc"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_missing_credentials_skip_without_network() {
        let notification = Notification {
            title: "title".to_string(),
            body: "body".to_string(),
            tag: None,
            short: None,
        };
        let outcome = send(&http::agent(), None, &notification);
        assert_eq!(outcome, SinkOutcome::Skipped);
    }
}
