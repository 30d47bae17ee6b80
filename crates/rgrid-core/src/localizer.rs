//! Date formatting and comparison.

use std::collections::HashMap;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Named formats a [`Localizer`] knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKey {
    /// Header label for a day column.
    DayFormat,
    /// Full date, used when reporting a drilldown target.
    DateFormat,
}

/// Granularity for [`Localizer::eq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

/// Formats and compares dates for the header.
pub trait Localizer {
    /// Renders `date` using the format registered under `key`.
    fn format(&self, date: NaiveDateTime, key: FormatKey) -> String;

    /// Whether `a` and `b` fall in the same `granularity` unit.
    fn eq(&self, a: NaiveDateTime, b: NaiveDateTime, granularity: Granularity) -> bool {
        same_unit(a, b, granularity)
    }
}

/// Compares two timestamps truncated to `granularity`.
///
/// Weeks start on Monday (ISO weeks).
pub fn same_unit(a: NaiveDateTime, b: NaiveDateTime, granularity: Granularity) -> bool {
    let (da, db) = (a.date(), b.date());
    match granularity {
        Granularity::Year => da.year() == db.year(),
        Granularity::Month => da.year() == db.year() && da.month() == db.month(),
        Granularity::Week => da.iso_week() == db.iso_week(),
        Granularity::Day => da == db,
        Granularity::Hour => da == db && a.hour() == b.hour(),
        Granularity::Minute => da == db && a.hour() == b.hour() && a.minute() == b.minute(),
    }
}

/// Whether `pattern` is a well-formed chrono `strftime` pattern.
///
/// chrono panics when rendering a malformed pattern; callers that want to
/// reject bad configuration up front check with this.
pub fn is_valid_pattern(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

/// [`Localizer`] backed by chrono `strftime` patterns.
///
/// A key with no pattern, or a malformed one, formats as the ISO date.
#[derive(Debug, Clone)]
pub struct ChronoLocalizer {
    formats: HashMap<FormatKey, String>,
}

impl Default for ChronoLocalizer {
    fn default() -> Self {
        let formats = HashMap::from([
            (FormatKey::DayFormat, "%d %a".to_string()),
            (FormatKey::DateFormat, "%Y-%m-%d".to_string()),
        ]);
        Self { formats }
    }
}

impl ChronoLocalizer {
    /// Overrides the pattern for one format key.
    #[must_use]
    pub fn with_format(mut self, key: FormatKey, pattern: impl Into<String>) -> Self {
        self.formats.insert(key, pattern.into());
        self
    }

    /// The pattern currently registered for `key`.
    pub fn pattern(&self, key: FormatKey) -> Option<&str> {
        self.formats.get(&key).map(String::as_str)
    }
}

impl Localizer for ChronoLocalizer {
    fn format(&self, date: NaiveDateTime, key: FormatKey) -> String {
        match self.formats.get(&key) {
            Some(pattern) if is_valid_pattern(pattern) => date.format(pattern).to_string(),
            Some(pattern) => {
                tracing::warn!(?key, %pattern, "malformed format pattern, using ISO date");
                date.date().to_string()
            }
            None => date.date().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn default_day_format() {
        let localizer = ChronoLocalizer::default();
        // Jan 29, 2025 is a Wednesday
        assert_eq!(
            localizer.format(at(2025, 1, 29, 9, 0), FormatKey::DayFormat),
            "29 Wed"
        );
    }

    #[test]
    fn custom_format_overrides_default() {
        let localizer = ChronoLocalizer::default().with_format(FormatKey::DayFormat, "%b %-d");
        assert_eq!(
            localizer.format(at(2025, 1, 29, 9, 0), FormatKey::DayFormat),
            "Jan 29"
        );
        assert_eq!(localizer.pattern(FormatKey::DayFormat), Some("%b %-d"));
    }

    #[test]
    fn malformed_pattern_falls_back_to_iso_date() {
        let localizer = ChronoLocalizer::default().with_format(FormatKey::DayFormat, "%d %");
        assert_eq!(
            localizer.format(at(2025, 1, 29, 9, 0), FormatKey::DayFormat),
            "2025-01-29"
        );
    }

    #[test]
    fn date_format_default() {
        let localizer = ChronoLocalizer::default();
        assert_eq!(
            localizer.format(at(2025, 1, 29, 9, 0), FormatKey::DateFormat),
            "2025-01-29"
        );
    }

    #[test]
    fn day_equality_ignores_time_of_day() {
        let localizer = ChronoLocalizer::default();
        let morning = at(2025, 1, 29, 0, 0);
        let evening = at(2025, 1, 29, 23, 59);

        assert!(localizer.eq(morning, evening, Granularity::Day));
        assert!(!localizer.eq(morning, evening, Granularity::Hour));
        assert!(!localizer.eq(morning, at(2025, 1, 30, 0, 0), Granularity::Day));
    }

    #[test]
    fn pattern_validation() {
        assert!(is_valid_pattern("%d %a"));
        assert!(is_valid_pattern("plain text"));
        assert!(!is_valid_pattern("%d %"));
    }

    #[test]
    fn coarser_granularities() {
        // Jan 27 (Mon) and Feb 2 (Sun) share an ISO week
        assert!(same_unit(at(2025, 1, 27, 8, 0), at(2025, 2, 2, 8, 0), Granularity::Week));
        assert!(!same_unit(at(2025, 1, 27, 8, 0), at(2025, 2, 3, 8, 0), Granularity::Week));
        assert!(same_unit(at(2025, 1, 1, 8, 0), at(2025, 1, 31, 8, 0), Granularity::Month));
        assert!(same_unit(at(2025, 1, 1, 8, 0), at(2025, 12, 31, 8, 0), Granularity::Year));
        assert!(same_unit(at(2025, 1, 1, 8, 5), at(2025, 1, 1, 8, 5), Granularity::Minute));
    }
}
