//! Header composition: one column per date, each with a drilldown-aware
//! label and the date's resource header cells.
//!
//! # Layout rules
//!
//! - A range of one date (or none) uses the single-day variant: the label is
//!   plain text even when a drilldown view resolves. With at most one
//!   resource the column also gets the single-resource class.
//! - Longer ranges render the label as a drilldown link whenever the
//!   resolver returns a view.
//! - When the content area overflows, the container reserves the scrollbar
//!   width on its trailing edge (left under RTL).

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::accessors::Accessors;
use crate::column::{HeaderCell, RESOURCE_ROW_CLASS, build_date_column};
use crate::drilldown::{DrilldownDispatcher, Interaction};
use crate::grouping::Resources;
use crate::localizer::{FormatKey, Granularity, Localizer};
use crate::render::{
    DayPropGetter, DefaultHeaderLabel, DefaultResourceHeader, GutterHeaderRenderer,
    HeaderLabelRenderer, NoDayProps, ResourceHeaderRenderer,
};
use crate::view::View;

const CONTAINER_CLASS: &str = "rbc-time-header";
const OVERFLOWING_CLASS: &str = "rbc-overflowing";
const GUTTER_CLASS: &str = "rbc-label rbc-time-header-gutter";
const COLUMN_CLASS: &str = "rbc-time-header-content inverted";
const ROW_CLASS: &str = "rbc-row rbc-time-header-cell inverted";
const SINGLE_RESOURCE_CLASS: &str = "rbc-time-header-cell-single-day";
const DATE_CLASS: &str = "rbc-header-date";
const SINGLE_DAY_DATE_CLASS: &str = "rbc-header-date-single-day inverted";
const TODAY_CLASS: &str = "rbc-today";

/// Overflow state reported by the host's scroll container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverflowState {
    /// Whether the content area currently shows a vertical scrollbar.
    pub is_overflowing: bool,
    /// Right-to-left layout.
    pub rtl: bool,
    /// Measured scrollbar thickness in pixels.
    pub scrollbar_size: u32,
}

/// Side of the header container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Space reserved on one edge of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub edge: Edge,
    pub px: u32,
}

impl OverflowState {
    /// The margin compensating for the scrollbar, if overflowing.
    pub const fn compensation(&self) -> Option<Margin> {
        if !self.is_overflowing {
            return None;
        }
        let edge = if self.rtl { Edge::Left } else { Edge::Right };
        Some(Margin {
            edge,
            px: self.scrollbar_size,
        })
    }
}

/// The time-gutter cell at the start of the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GutterCell {
    pub class_name: &'static str,
    /// Fixed width (also used as min and max width).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Output of the gutter header renderer, if one is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl GutterCell {
    /// Inline style pinning the cell to its fixed width; empty when unset.
    pub fn style(&self) -> BTreeMap<String, String> {
        let Some(width) = self.width else {
            return BTreeMap::new();
        };
        ["width", "min-width", "max-width"]
            .into_iter()
            .map(|property| (property.to_string(), format!("{width}px")))
            .collect()
    }
}

/// The outer header container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderContainer {
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    pub gutter: GutterCell,
}

/// Structural variant of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    MultiDay,
    SingleDay,
    SingleDaySingleResource,
}

impl LayoutVariant {
    /// Picks the variant from the range length and resource count.
    pub const fn select(range_len: usize, resource_count: usize) -> Self {
        match (range_len <= 1, resource_count <= 1) {
            (false, _) => Self::MultiDay,
            (true, false) => Self::SingleDay,
            (true, true) => Self::SingleDaySingleResource,
        }
    }

    /// Whether this is one of the single-day variants.
    pub const fn is_single_day(self) -> bool {
        !matches!(self, Self::MultiDay)
    }
}

/// What interacting with a date label does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelAction {
    /// Rendered as a link drilling down into `view`.
    Drilldown { view: View },
    /// Rendered as plain text.
    Plain,
}

/// The date label at the top of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateLabel {
    /// Localized label text.
    pub text: String,
    /// Output of the header label renderer.
    pub content: String,
    pub action: LabelAction,
    pub class_name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
}

/// One date column of the header.
#[derive(Debug, Serialize)]
pub struct HeaderColumn<'a, R> {
    /// ISO timestamp of the date; duplicate dates share a key.
    pub key: String,
    /// Position in the range.
    pub position: usize,
    pub date: NaiveDateTime,
    pub is_today: bool,
    pub variant: LayoutVariant,
    pub class_name: &'static str,
    pub row_class_name: String,
    pub label: DateLabel,
    pub cells_class_name: &'static str,
    pub cells: Vec<HeaderCell<'a, R>>,
}

impl<R> HeaderColumn<'_, R> {
    /// Handles a click on this column's date label.
    ///
    /// Returns `true` when the label is a drilldown link and the click was
    /// dispatched; plain labels ignore the click.
    pub fn click(
        &self,
        dispatcher: &mut DrilldownDispatcher<'_>,
        interaction: &mut dyn Interaction,
    ) -> bool {
        match self.label.action {
            LabelAction::Drilldown { view } => {
                dispatcher.handle_header_click(self.date, view, interaction);
                true
            }
            LabelAction::Plain => false,
        }
    }
}

/// The composed header.
#[derive(Debug, Serialize)]
pub struct HeaderLayout<'a, R> {
    pub container: HeaderContainer,
    pub columns: Vec<HeaderColumn<'a, R>>,
}

/// Resolves the drilldown target for a date label.
pub type DrilldownResolver<'h> = &'h dyn Fn(NaiveDateTime) -> Option<View>;

fn no_drilldown(_date: NaiveDateTime) -> Option<View> {
    None
}

/// Composes [`HeaderLayout`]s.
///
/// Collaborators are resolved once, when the composer is built; defaults are
/// no drilldown, [`DefaultResourceHeader`], [`DefaultHeaderLabel`] and
/// [`NoDayProps`].
pub struct HeaderComposer<'h, R> {
    localizer: &'h dyn Localizer,
    drilldown: DrilldownResolver<'h>,
    resource_header: &'h dyn ResourceHeaderRenderer<R>,
    header_label: &'h dyn HeaderLabelRenderer,
    day_props: &'h dyn DayPropGetter,
    gutter_header: Option<&'h dyn GutterHeaderRenderer>,
    overflow: OverflowState,
    gutter_width: Option<u32>,
}

impl<'h, R> HeaderComposer<'h, R> {
    /// Creates a composer with default collaborators.
    pub fn new(localizer: &'h dyn Localizer) -> Self {
        Self {
            localizer,
            drilldown: &no_drilldown,
            resource_header: &DefaultResourceHeader,
            header_label: &DefaultHeaderLabel,
            day_props: &NoDayProps,
            gutter_header: None,
            overflow: OverflowState::default(),
            gutter_width: None,
        }
    }

    /// Sets the drilldown view resolver.
    #[must_use]
    pub fn drilldown(mut self, resolver: DrilldownResolver<'h>) -> Self {
        self.drilldown = resolver;
        self
    }

    /// Overrides the resource header cell renderer.
    #[must_use]
    pub fn resource_header(mut self, renderer: &'h dyn ResourceHeaderRenderer<R>) -> Self {
        self.resource_header = renderer;
        self
    }

    /// Overrides the date label renderer.
    #[must_use]
    pub fn header_label(mut self, renderer: &'h dyn HeaderLabelRenderer) -> Self {
        self.header_label = renderer;
        self
    }

    /// Sets the per-date props getter.
    #[must_use]
    pub fn day_props(mut self, getter: &'h dyn DayPropGetter) -> Self {
        self.day_props = getter;
        self
    }

    /// Sets the renderer for the time gutter cell's content.
    #[must_use]
    pub fn gutter_header(mut self, renderer: &'h dyn GutterHeaderRenderer) -> Self {
        self.gutter_header = Some(renderer);
        self
    }

    /// Sets the overflow state of the content area.
    #[must_use]
    pub fn overflow(mut self, overflow: OverflowState) -> Self {
        self.overflow = overflow;
        self
    }

    /// Fixes the width of the time gutter cell.
    #[must_use]
    pub fn gutter_width(mut self, width: u32) -> Self {
        self.gutter_width = Some(width);
        self
    }

    /// Builds one column per date in `range`, in range order.
    ///
    /// `today` is the caller's "now"; a column is flagged when it falls on
    /// the same calendar day.
    pub fn compose<'a, A>(
        &self,
        range: &[NaiveDateTime],
        resources: &Resources<'a, A>,
        today: NaiveDateTime,
    ) -> HeaderLayout<'a, R>
    where
        A: Accessors<Resource = R>,
        A::Id: fmt::Display,
    {
        let variant = LayoutVariant::select(range.len(), resources.len());

        let columns: Vec<_> = range
            .iter()
            .enumerate()
            .map(|(position, &date)| self.column(position, date, variant, resources, today))
            .collect();

        tracing::debug!(
            dates = range.len(),
            resources = resources.len(),
            ?variant,
            overflowing = self.overflow.is_overflowing,
            "composed header"
        );

        HeaderLayout {
            container: self.container(),
            columns,
        }
    }

    fn container(&self) -> HeaderContainer {
        let class_name = if self.overflow.is_overflowing {
            format!("{CONTAINER_CLASS} {OVERFLOWING_CLASS}")
        } else {
            CONTAINER_CLASS.to_string()
        };
        HeaderContainer {
            class_name,
            margin: self.overflow.compensation(),
            gutter: GutterCell {
                class_name: GUTTER_CLASS,
                width: self.gutter_width,
                content: self.gutter_header.map(|renderer| renderer.render_gutter()),
            },
        }
    }

    fn column<'a, A>(
        &self,
        position: usize,
        date: NaiveDateTime,
        variant: LayoutVariant,
        resources: &Resources<'a, A>,
        today: NaiveDateTime,
    ) -> HeaderColumn<'a, R>
    where
        A: Accessors<Resource = R>,
        A::Id: fmt::Display,
    {
        let is_today = self.localizer.eq(date, today, Granularity::Day);
        let text = self.localizer.format(date, FormatKey::DayFormat);
        let content = self.header_label.render_label(date, &text, self.localizer);

        let action = match (variant.is_single_day(), (self.drilldown)(date)) {
            (false, Some(view)) => LabelAction::Drilldown { view },
            _ => LabelAction::Plain,
        };

        let day_prop = self.day_props.day_prop(date);
        let base_class = if variant.is_single_day() {
            SINGLE_DAY_DATE_CLASS
        } else {
            DATE_CLASS
        };
        let class_name = class_list(&[
            Some(base_class),
            day_prop.class_name.as_deref(),
            is_today.then_some(TODAY_CLASS),
        ]);

        let row_class_name = if variant == LayoutVariant::SingleDaySingleResource {
            format!("{ROW_CLASS} {SINGLE_RESOURCE_CLASS}")
        } else {
            ROW_CLASS.to_string()
        };

        HeaderColumn {
            key: date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            position,
            date,
            is_today,
            variant,
            class_name: COLUMN_CLASS,
            row_class_name,
            label: DateLabel {
                text,
                content,
                action,
                class_name,
                style: day_prop.style,
            },
            cells_class_name: RESOURCE_ROW_CLASS,
            cells: build_date_column(resources, date.date(), self.resource_header),
        }
    }
}

/// Joins the present, non-empty class names with single spaces.
fn class_list(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
