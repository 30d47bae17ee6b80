//! Pluggable cell renderers and per-day props.
//!
//! Hosts customise header content by passing their own implementations to
//! [`HeaderComposer`](crate::HeaderComposer). Closures implement every trait
//! here, so a one-off override needs no named type.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::localizer::Localizer;

/// What a resource header cell stands for.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellResource<'a, R> {
    /// A full-time resource.
    Resource(&'a R),
    /// The synthetic context used when no resource list was supplied.
    Unassigned,
    /// The catch-all "other" cell.
    Other,
}

impl<R> Clone for CellResource<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for CellResource<'_, R> {}

impl<R> PartialEq for CellResource<'_, R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Resource(a), Self::Resource(b)) => std::ptr::eq(*a, *b),
            (Self::Unassigned, Self::Unassigned) | (Self::Other, Self::Other) => true,
            _ => false,
        }
    }
}

/// Input to a [`ResourceHeaderRenderer`].
#[derive(Debug)]
pub struct ResourceHeaderProps<'a, R> {
    pub index: usize,
    pub title: &'a str,
    pub minutes: Option<u32>,
    pub resource: CellResource<'a, R>,
}

/// Renders the content of one resource header cell.
pub trait ResourceHeaderRenderer<R> {
    fn render_cell(&self, props: &ResourceHeaderProps<'_, R>) -> String;
}

/// Title, followed by the booked minutes when known: `Room A (90 min)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResourceHeader;

impl<R> ResourceHeaderRenderer<R> for DefaultResourceHeader {
    fn render_cell(&self, props: &ResourceHeaderProps<'_, R>) -> String {
        match props.minutes {
            Some(minutes) => format!("{} ({minutes} min)", props.title),
            None => props.title.to_string(),
        }
    }
}

impl<R, F> ResourceHeaderRenderer<R> for F
where
    F: Fn(&ResourceHeaderProps<'_, R>) -> String,
{
    fn render_cell(&self, props: &ResourceHeaderProps<'_, R>) -> String {
        self(props)
    }
}

/// Renders the content of a date label.
///
/// The composer decides whether the result is wrapped as a drilldown link
/// or plain text.
pub trait HeaderLabelRenderer {
    fn render_label(&self, date: NaiveDateTime, label: &str, localizer: &dyn Localizer) -> String;
}

/// Uses the localized label unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHeaderLabel;

impl HeaderLabelRenderer for DefaultHeaderLabel {
    fn render_label(&self, _date: NaiveDateTime, label: &str, _localizer: &dyn Localizer) -> String {
        label.to_string()
    }
}

impl<F> HeaderLabelRenderer for F
where
    F: Fn(NaiveDateTime, &str, &dyn Localizer) -> String,
{
    fn render_label(&self, date: NaiveDateTime, label: &str, localizer: &dyn Localizer) -> String {
        self(date, label, localizer)
    }
}

/// Renders content inside the time gutter cell of the header row.
///
/// Optional: without one the gutter cell is empty.
pub trait GutterHeaderRenderer {
    fn render_gutter(&self) -> String;
}

impl<F> GutterHeaderRenderer for F
where
    F: Fn() -> String,
{
    fn render_gutter(&self) -> String {
        self()
    }
}

/// Extra class name and inline style for one date's label cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayProp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
}

/// Supplies [`DayProp`]s per date.
pub trait DayPropGetter {
    fn day_prop(&self, date: NaiveDateTime) -> DayProp;
}

/// No extra props for any date.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDayProps;

impl DayPropGetter for NoDayProps {
    fn day_prop(&self, _date: NaiveDateTime) -> DayProp {
        DayProp::default()
    }
}

impl<F> DayPropGetter for F
where
    F: Fn(NaiveDateTime) -> DayProp,
{
    fn day_prop(&self, date: NaiveDateTime) -> DayProp {
        self(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localizer::ChronoLocalizer;
    use chrono::{Datelike, NaiveDate, Weekday};

    fn props(minutes: Option<u32>) -> ResourceHeaderProps<'static, ()> {
        ResourceHeaderProps {
            index: 0,
            title: "Room A",
            minutes,
            resource: CellResource::Unassigned,
        }
    }

    #[test]
    fn default_resource_header_appends_minutes() {
        assert_eq!(DefaultResourceHeader.render_cell(&props(Some(90))), "Room A (90 min)");
        assert_eq!(DefaultResourceHeader.render_cell(&props(None)), "Room A");
    }

    fn upper(props: &ResourceHeaderProps<'_, ()>) -> String {
        props.title.to_uppercase()
    }

    fn bracketed(_date: NaiveDateTime, label: &str, _localizer: &dyn Localizer) -> String {
        format!("[{label}]")
    }

    #[test]
    fn function_resource_header() {
        assert_eq!(upper.render_cell(&props(None)), "ROOM A");
    }

    #[test]
    fn function_header_label_gets_localizer() {
        let localizer = ChronoLocalizer::default();
        let date = NaiveDate::from_ymd_opt(2025, 1, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(bracketed.render_label(date, "29 Wed", &localizer), "[29 Wed]");
        assert_eq!(DefaultHeaderLabel.render_label(date, "29 Wed", &localizer), "29 Wed");
    }

    #[test]
    fn closure_day_props() {
        let weekend = |date: NaiveDateTime| {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                DayProp {
                    class_name: Some("weekend".to_string()),
                    style: BTreeMap::new(),
                }
            } else {
                DayProp::default()
            }
        };
        let saturday = NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(weekend.day_prop(saturday).class_name.as_deref(), Some("weekend"));
        assert_eq!(NoDayProps.day_prop(saturday), DayProp::default());
    }

    #[test]
    fn cell_resource_equality_is_identity() {
        let a = 1_u8;
        let b = 1_u8;
        assert_eq!(CellResource::Resource(&a), CellResource::Resource(&a));
        assert_ne!(CellResource::Resource(&a), CellResource::Resource(&b));
        assert_eq!(CellResource::<u8>::Other, CellResource::Other);
    }
}
