//! Derived usage metrics computed from the raw API counters.

use crate::usage_api::RawUsage;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Fully derived usage metrics for a single check.
#[derive(Debug, Clone)]
pub struct UsageReport {
    pub used_gb: f64,
    pub limit_gb: f64,
    pub remaining_gb: f64,
    pub percentage_used: f64,
    pub next_reset_date: NaiveDate,
    pub days_until_reset: i64,
    pub checked_at: NaiveDateTime,
}

impl UsageReport {
    /// Computes all derived metrics from the raw counters at `now`.
    ///
    /// The clock is passed in by the caller so tests can pin it.
    pub fn compute(raw: &RawUsage, now: NaiveDateTime) -> Self {
        let used_gb = bytes_to_gb(raw.used_bytes);
        let limit_gb = bytes_to_gb(raw.limit_bytes);
        let percentage_used = if raw.limit_bytes > 0 {
            raw.used_bytes as f64 / raw.limit_bytes as f64 * 100.0
        } else {
            0.0
        };
        let next_reset_date = next_reset_date(now.date(), raw.reset_day);
        let days_until_reset = (next_reset_date.and_time(NaiveTime::MIN) - now).num_days();

        Self {
            used_gb,
            limit_gb,
            remaining_gb: limit_gb - used_gb,
            percentage_used,
            next_reset_date,
            days_until_reset,
            checked_at: now,
        }
    }
}

/// Converts a byte count to gigabytes, rounded to two decimals.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_GB * 100.0).round() / 100.0
}

/// Computes the next date the bandwidth counter resets.
///
/// Before the reset day the reset falls in the current month; on or
/// after it, in the following month, with December rolling into January
/// of the next year. A reset day past the end of the target month is
/// clamped to the month's last day.
pub fn next_reset_date(today: NaiveDate, reset_day: u32) -> NaiveDate {
    let (year, month) = if today.day() < reset_day {
        (today.year(), today.month())
    } else if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };

    let day = reset_day.clamp(1, month_length(year, month));
    // The clamp keeps the day in range, so construction cannot fail.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(today)
}

/// Number of days in the given month.
fn month_length(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
