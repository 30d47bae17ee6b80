//! Header and grouping core of a multi-resource calendar grid.
//!
//! This crate contains the fundamental types and logic for:
//! - Grouping: partitioning events by resource, folding part-time resources
//!   into a catch-all "other" bucket
//! - Header composition: one column per date, each with a drilldown-aware
//!   label and a row of resource header cells
//! - Drilldown: turning date label clicks into navigation notifications
//!
//! Everything here is a pure computation over caller-supplied inputs; the
//! caller passes "now" explicitly.

pub mod accessors;
pub mod column;
pub mod drilldown;
pub mod grouping;
pub mod header;
pub mod localizer;
pub mod render;
pub mod rows;
pub mod types;
pub mod view;

pub use accessors::{Accessors, DefaultAccessors};
pub use column::{HeaderCell, OTHER_CELL_INDEX, OTHER_CELL_KEY, OTHER_CELL_TITLE, build_date_column};
pub use drilldown::{DrilldownDispatcher, HeaderClick, Interaction};
pub use grouping::{EventBuckets, ResourceEntry, ResourceKey, Resources};
pub use header::{
    DateLabel, Edge, GutterCell, HeaderColumn, HeaderComposer, HeaderContainer, HeaderLayout,
    LabelAction, LayoutVariant, Margin, OverflowState,
};
pub use localizer::{ChronoLocalizer, FormatKey, Granularity, Localizer};
pub use render::{
    CellResource, DayProp, DayPropGetter, DefaultHeaderLabel, DefaultResourceHeader,
    GutterHeaderRenderer, HeaderLabelRenderer, NoDayProps, ResourceHeaderProps,
    ResourceHeaderRenderer,
};
pub use rows::{ContentRow, content_rows};
pub use types::{Event, EventId, Resource, ResourceId, ValidationError};
pub use view::{UnknownView, View};
