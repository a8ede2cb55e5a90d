//! Notification rendering and severity escalation.

use crate::balance_api::BalanceReport;
use crate::report::UsageReport;

/// Escalation level derived from the usage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Classifies a usage percentage.
    ///
    /// The checks run in sequence so crossing the critical threshold
    /// overrides the warning one rather than appending to it.
    pub fn from_percentage(percentage: f64) -> Self {
        let mut severity = Severity::Info;
        if percentage > 80.0 {
            severity = Severity::Warning;
        }
        if percentage > 95.0 {
            severity = Severity::Critical;
        }
        severity
    }

    pub fn tag(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// A rendered notification ready for delivery.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    /// Markdown body.
    pub body: String,
    pub tag: Option<String>,
    /// One-line summary shown in the push sink's preview.
    pub short: Option<String>,
}

/// Renders the usage report, escalating the title by percentage used.
pub fn usage_notification(report: &UsageReport, balance: Option<&BalanceReport>) -> Notification {
    let severity = Severity::from_percentage(report.percentage_used);
    let title = match severity {
        Severity::Info => "Bandwidth usage report",
        Severity::Warning => "⚠️ Bandwidth usage above 80%",
        Severity::Critical => "🚨 Bandwidth usage above 95%, action required",
    };

    let mut body = format!(
        "## Bandwidth usage\n\
         - Used: **{:.2} GB**\n\
         - Monthly limit: **{:.2} GB**\n\
         - Remaining: **{:.2} GB**\n\
         - Percentage used: **{:.2}%**\n\
         - Next reset: **{}** (in {} days)\n\
         - Checked at: **{}**\n",
        report.used_gb,
        report.limit_gb,
        report.remaining_gb,
        report.percentage_used,
        report.next_reset_date.format("%Y-%m-%d"),
        report.days_until_reset,
        report.checked_at.format("%Y-%m-%d %H:%M:%S"),
    );

    if let Some(balance) = balance {
        let section = format!(
            "\n## Account balance\n\
             - Total: **{} CNY**\n\
             - Granted: **{} CNY**\n\
             - Topped up: **{} CNY**\n",
            balance.total_balance, balance.granted_balance, balance.topped_up_balance,
        );
        body.push_str(&section);
    }

    let short = format!(
        "Used {:.2}/{:.2} GB ({:.2}%), resets in {} days",
        report.used_gb, report.limit_gb, report.percentage_used, report.days_until_reset,
    );

    Notification {
        title: title.to_string(),
        body,
        tag: Some(severity.tag().to_string()),
        short: Some(short),
    }
}

/// Fixed notification used when the usage API could not be reached.
pub fn fetch_failure_notification() -> Notification {
    Notification {
        title: "Bandwidth check failed".to_string(),
        body: "Could not fetch usage data. Check that the usage API URL is correct.".to_string(),
        tag: None,
        short: None,
    }
}

/// Notification for a response that arrived but could not be processed.
///
/// The raw body is embedded so the payload can be diagnosed from the
/// notification alone.
pub fn processing_error_notification(
    error: &anyhow::Error,
    raw: &serde_json::Value,
) -> Notification {
    Notification {
        title: "Bandwidth data processing error".to_string(),
        body: format!("Failed to process usage data: {error:#}\n\nRaw data: {raw}"),
        tag: Some("error".to_string()),
        short: Some("Failed to process usage data".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage_api::RawUsage;
    use chrono::NaiveDate;

    fn report(percentage: f64) -> UsageReport {
        let now = NaiveDate::from_ymd_opt(2026, 8, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let raw = RawUsage {
            limit_bytes: 1000,
            used_bytes: (percentage * 10.0).round() as u64,
            reset_day: 10,
        };
        UsageReport::compute(&raw, now)
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_percentage(0.0), Severity::Info);
        assert_eq!(Severity::from_percentage(79.9), Severity::Info);
        assert_eq!(Severity::from_percentage(80.0), Severity::Info);
        assert_eq!(Severity::from_percentage(80.1), Severity::Warning);
        assert_eq!(Severity::from_percentage(95.0), Severity::Warning);
        assert_eq!(Severity::from_percentage(95.1), Severity::Critical);
        assert_eq!(Severity::from_percentage(200.0), Severity::Critical);
    }

    #[test]
    fn test_critical_overrides_warning_title() {
        // Exactly one title wins above both thresholds
        let notification = usage_notification(&report(96.0), None);
        assert!(notification.title.contains("95%"));
        assert!(!notification.title.contains("80%"));
        assert_eq!(notification.tag.as_deref(), Some("critical"));
    }

    #[test]
    fn test_baseline_notification_contents() {
        let notification = usage_notification(&report(50.0), None);
        assert_eq!(notification.title, "Bandwidth usage report");
        assert_eq!(notification.tag.as_deref(), Some("info"));
        assert!(notification.body.contains("## Bandwidth usage"));
        assert!(notification.body.contains("**50.00%**"));
        assert!(notification.body.contains("2026-09-10"));
        assert!(notification.body.contains("Checked at: **2026-08-15 10:30:00**"));
        assert!(!notification.body.contains("## Account balance"));
        assert!(notification.short.unwrap().contains("resets in"));
    }

    #[test]
    fn test_balance_section_appended_when_present() {
        let balance = BalanceReport {
            total_balance: "110.00".to_string(),
            granted_balance: "10.00".to_string(),
            topped_up_balance: "100.00".to_string(),
        };
        let notification = usage_notification(&report(50.0), Some(&balance));
        assert!(notification.body.contains("## Account balance"));
        assert!(notification.body.contains("**110.00 CNY**"));
    }

    #[test]
    fn test_fetch_failure_notification_is_fixed_text() {
        let notification = fetch_failure_notification();
        assert_eq!(notification.title, "Bandwidth check failed");
        assert!(notification.body.contains("Could not fetch usage data"));
        assert!(notification.tag.is_none());
        assert!(notification.short.is_none());
    }

    #[test]
    fn test_processing_error_embeds_raw_data() {
        let raw = serde_json::json!({"bw_counter_b": "oops"});
        let error = anyhow::anyhow!("Failed to extract usage fields");
        let notification = processing_error_notification(&error, &raw);
        assert_eq!(notification.title, "Bandwidth data processing error");
        assert_eq!(notification.tag.as_deref(), Some("error"));
        assert!(notification.body.contains(r#""bw_counter_b":"oops""#));
    }
}
