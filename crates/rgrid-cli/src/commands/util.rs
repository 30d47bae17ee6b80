//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: i64 = 1000 * 365;

/// Longest date range a header is built for.
pub const MAX_RANGE_DAYS: u32 = 366;

/// Parse a date argument relative to `now`.
///
/// Supports:
/// - ISO 8601 dates and datetimes: "2025-01-27", "2025-01-27T09:30:00"
/// - Keywords: "today", "tomorrow", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
///
/// Dates without a time are placed at midnight.
pub fn parse_date(s: &str, now: NaiveDateTime) -> anyhow::Result<NaiveDateTime> {
    let s = s.trim();
    let today = now.date();

    match s {
        "today" => return Ok(midnight(today)),
        "tomorrow" => return shift(today, 1),
        "yesterday" => return shift(today, -1),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(midnight(date));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Ok(dt);
        }
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS, today, or relative (e.g., '3 days ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;

    let days_per_unit = match &caps[2] {
        "day" => 1,
        "week" => 7,
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };

    if n > MAX_RELATIVE_DAYS / days_per_unit {
        anyhow::bail!("Relative date too far back: {n} {}", &caps[2]);
    }

    shift(today, -(n * days_per_unit))
}

/// `days` consecutive dates starting at `start`.
///
/// Fails when `days` exceeds [`MAX_RANGE_DAYS`] or the range runs past the
/// last representable date.
pub fn date_range(start: NaiveDateTime, days: u32) -> anyhow::Result<Vec<NaiveDateTime>> {
    if days > MAX_RANGE_DAYS {
        anyhow::bail!("Range too long: {days} days (at most {MAX_RANGE_DAYS})");
    }

    (0..i64::from(days))
        .map(|offset| {
            start
                .checked_add_signed(Duration::days(offset))
                .with_context(|| format!("Date out of range: {start} + {offset} days"))
        })
        .collect()
}

fn shift(date: NaiveDate, days: i64) -> anyhow::Result<NaiveDateTime> {
    date.checked_add_signed(Duration::days(days))
        .map(midnight)
        .with_context(|| format!("Date out of range: {date} {days:+} days"))
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
