//! Event subsets handed to the all-day content row renderer.

use chrono::NaiveDateTime;

use crate::accessors::Accessors;
use crate::grouping::{ResourceKey, Resources};

/// Input for rendering one resource's all-day event strip.
#[derive(Debug)]
pub struct ContentRow<'r, 'e, Id, E> {
    pub key: ResourceKey<Id>,
    /// Events booked on this row's resource, in input order.
    pub events: Vec<&'e E>,
    pub range: &'r [NaiveDateTime],
}

/// Builds one content row per resource entry.
///
/// Each row holds the events whose resource id equals the entry's id. Without
/// a resource list there is a single row holding every event unfiltered.
/// Part-time folding does not apply here: a part-time resource's row still
/// gets its own events.
pub fn content_rows<'r, 'e, A>(
    resources: &Resources<'_, A>,
    events: &'e [A::Event],
    range: &'r [NaiveDateTime],
) -> Vec<ContentRow<'r, 'e, A::Id, A::Event>>
where
    A: Accessors,
{
    let accessors = resources.accessors();

    resources.map(|entry, _| {
        let events = match (&entry.key, entry.resource) {
            (ResourceKey::Explicit(id), Some(_)) => events
                .iter()
                .filter(|event| accessors.event_resource(event).as_ref() == Some(id))
                .collect(),
            _ => events.iter().collect(),
        };
        ContentRow {
            key: entry.key,
            events,
            range,
        }
    })
}
