//! Resource header cells for a single date column.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::accessors::Accessors;
use crate::grouping::{ResourceKey, Resources};
use crate::render::{CellResource, ResourceHeaderProps, ResourceHeaderRenderer};

/// Index reported for the trailing "other" cell.
pub const OTHER_CELL_INDEX: usize = 1000;

/// Title of the trailing "other" cell.
pub const OTHER_CELL_TITLE: &str = "other";

/// Key of the trailing "other" cell.
pub const OTHER_CELL_KEY: &str = "resource_other";

/// Class list of every resource header cell.
pub const RESOURCE_CELL_CLASS: &str = "rbc-row-resource inverted";

/// Class list of the row wrapping a column's resource cells.
pub const RESOURCE_ROW_CLASS: &str = "rbc-header inverted";

/// One resource header cell.
#[derive(Debug, Serialize)]
pub struct HeaderCell<'a, R> {
    /// Stable key: `resource_<id>`, `resource_<index>` or `resource_other`.
    pub key: String,
    /// Position in the resource list, or [`OTHER_CELL_INDEX`].
    pub index: usize,
    pub title: String,
    /// Booked minutes for the column's date; `None` renders as empty.
    pub minutes: Option<u32>,
    /// Output of the resource header renderer.
    pub content: String,
    pub class_name: &'static str,
    pub resource: CellResource<'a, R>,
}

/// Builds the resource header cells for `date`.
///
/// Part-time resources are skipped; their events are represented by the
/// trailing "other" cell, which is always appended. Without a resource list
/// the synthetic context still gets a cell (with an empty title), so the
/// column holds two cells.
pub fn build_date_column<'a, A, H>(
    resources: &Resources<'a, A>,
    date: NaiveDate,
    renderer: &H,
) -> Vec<HeaderCell<'a, A::Resource>>
where
    A: Accessors,
    A::Id: fmt::Display,
    H: ResourceHeaderRenderer<A::Resource> + ?Sized,
{
    let accessors = resources.accessors();

    let mut cells: Vec<_> = resources
        .map(|entry, idx| {
            let (title, minutes, cell_resource) = match entry.resource {
                Some(resource) if accessors.is_part_time(resource) => return None,
                Some(resource) => (
                    accessors.resource_title(resource),
                    accessors.minutes_on(resource, date),
                    CellResource::Resource(resource),
                ),
                None => (String::new(), None, CellResource::Unassigned),
            };
            let key = match &entry.key {
                ResourceKey::Explicit(id) => format!("resource_{id}"),
                ResourceKey::None | ResourceKey::Other => format!("resource_{idx}"),
            };
            Some(make_cell(renderer, key, idx, title, minutes, cell_resource))
        })
        .into_iter()
        .flatten()
        .collect();

    cells.push(make_cell(
        renderer,
        OTHER_CELL_KEY.to_string(),
        OTHER_CELL_INDEX,
        OTHER_CELL_TITLE.to_string(),
        None,
        CellResource::Other,
    ));

    tracing::trace!(%date, cells = cells.len(), "built date column");
    cells
}

fn make_cell<'a, R, H>(
    renderer: &H,
    key: String,
    index: usize,
    title: String,
    minutes: Option<u32>,
    resource: CellResource<'a, R>,
) -> HeaderCell<'a, R>
where
    H: ResourceHeaderRenderer<R> + ?Sized,
{
    let content = renderer.render_cell(&ResourceHeaderProps {
        index,
        title: &title,
        minutes,
        resource,
    });
    HeaderCell {
        key,
        index,
        title,
        minutes,
        content,
        class_name: RESOURCE_CELL_CLASS,
        resource,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessors::DefaultAccessors;
    use crate::render::DefaultResourceHeader;
    use crate::types::{Resource, ResourceId};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()
    }

    fn resource(id: &str, title: &str) -> Resource {
        Resource::new(ResourceId::new(id).unwrap(), title)
    }

    fn keys<'c, R>(cells: &'c [HeaderCell<'_, R>]) -> Vec<&'c str> {
        cells.iter().map(|c| c.key.as_str()).collect()
    }

    #[test]
    fn part_time_resources_are_skipped_and_other_appended() {
        let resources = vec![resource("a", "Alice"), resource("b", "Bob").part_time()];
        let index = Resources::new(Some(resources.as_slice()), &DefaultAccessors);

        let cells = build_date_column(&index, day(), &DefaultResourceHeader);

        assert_eq!(keys(&cells), vec!["resource_a", "resource_other"]);
        assert_eq!(cells[0].index, 0);
        assert_eq!(cells[0].title, "Alice");
        assert_eq!(cells[1].index, OTHER_CELL_INDEX);
        assert_eq!(cells[1].title, "other");
        assert_eq!(cells[1].resource, CellResource::Other);
        assert!(cells.iter().all(|c| c.class_name == RESOURCE_CELL_CLASS));
    }

    #[test]
    fn cell_count_is_full_time_resources_plus_one() {
        let resources = vec![
            resource("a", "A"),
            resource("b", "B"),
            resource("c", "C"),
        ];
        let index = Resources::new(Some(resources.as_slice()), &DefaultAccessors);

        let cells = build_date_column(&index, day(), &DefaultResourceHeader);

        assert_eq!(cells.len(), 4);
        assert_eq!(cells.last().unwrap().key, OTHER_CELL_KEY);
    }

    #[test]
    fn index_keeps_original_position_after_skips() {
        let resources = vec![
            resource("p", "P").part_time(),
            resource("a", "A"),
            resource("q", "Q").part_time(),
            resource("b", "B"),
        ];
        let index = Resources::new(Some(resources.as_slice()), &DefaultAccessors);

        let cells = build_date_column(&index, day(), &DefaultResourceHeader);

        let positions: Vec<_> = cells.iter().map(|c| c.index).collect();
        assert_eq!(positions, vec![1, 3, OTHER_CELL_INDEX]);
    }

    #[test]
    fn minutes_come_from_the_column_date() {
        let next = day().succ_opt().unwrap();
        let resources = vec![resource("a", "Alice").with_minutes(day(), 90).with_minutes(next, 15)];
        let index = Resources::new(Some(resources.as_slice()), &DefaultAccessors);

        let today = build_date_column(&index, day(), &DefaultResourceHeader);
        let tomorrow = build_date_column(&index, next, &DefaultResourceHeader);
        let later = build_date_column(&index, next.succ_opt().unwrap(), &DefaultResourceHeader);

        assert_eq!(today[0].minutes, Some(90));
        assert_eq!(today[0].content, "Alice (90 min)");
        assert_eq!(tomorrow[0].minutes, Some(15));
        assert_eq!(later[0].minutes, None);
        assert_eq!(later[0].content, "Alice");
        assert_eq!(today[1].minutes, None);
    }

    #[test]
    fn no_resources_yields_context_cell_and_other_cell() {
        let index = Resources::<DefaultAccessors>::new(None, &DefaultAccessors);

        let cells = build_date_column(&index, day(), &DefaultResourceHeader);

        assert_eq!(keys(&cells), vec!["resource_0", "resource_other"]);
        assert_eq!(cells[0].title, "");
        assert_eq!(cells[0].resource, CellResource::Unassigned);
    }

    #[test]
    fn only_part_time_resources_leave_just_other() {
        let resources = vec![resource("p", "P").part_time()];
        let index = Resources::new(Some(resources.as_slice()), &DefaultAccessors);

        let cells = build_date_column(&index, day(), &DefaultResourceHeader);

        assert_eq!(keys(&cells), vec!["resource_other"]);
    }

    fn numbered(props: &ResourceHeaderProps<'_, Resource>) -> String {
        format!("#{} {}", props.index, props.title)
    }

    #[test]
    fn custom_renderer_sees_props() {
        let resources = vec![resource("a", "Alice")];
        let index = Resources::new(Some(resources.as_slice()), &DefaultAccessors);

        let cells = build_date_column(&index, day(), &numbered);

        assert_eq!(cells[0].content, "#0 Alice");
        assert_eq!(cells[1].content, "#1000 other");
    }
}
