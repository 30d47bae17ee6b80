//! Accessors extracting identity and display data from host entities.

use std::hash::Hash;

use chrono::NaiveDate;

use crate::types::{Event, Resource, ResourceId};

/// Reads the fields the grid needs from application resources and events.
///
/// This trait lets the grouping and header code work with any host
/// representation (the bundled [`Resource`]/[`Event`] types, or test fixtures).
pub trait Accessors {
    /// Application resource type.
    type Resource;

    /// Application event type.
    type Event;

    /// Resource identity. Must be stable across passes.
    type Id: Clone + Eq + Hash;

    /// Returns the resource's identity.
    fn resource_id(&self, resource: &Self::Resource) -> Self::Id;

    /// Returns the title shown in the resource header cell.
    fn resource_title(&self, resource: &Self::Resource) -> String;

    /// Returns the resource an event is booked on, `None` if unbound.
    fn event_resource(&self, event: &Self::Event) -> Option<Self::Id>;

    /// Whether the resource is folded into the "other" bucket.
    fn is_part_time(&self, _resource: &Self::Resource) -> bool {
        false
    }

    /// Booked minutes for `date`, if known.
    fn minutes_on(&self, _resource: &Self::Resource, _date: NaiveDate) -> Option<u32> {
        None
    }
}

/// Accessors for the bundled [`Resource`] and [`Event`] types.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAccessors;

impl Accessors for DefaultAccessors {
    type Resource = Resource;
    type Event = Event;
    type Id = ResourceId;

    fn resource_id(&self, resource: &Resource) -> ResourceId {
        resource.id.clone()
    }

    fn resource_title(&self, resource: &Resource) -> String {
        resource.title.clone()
    }

    fn event_resource(&self, event: &Event) -> Option<ResourceId> {
        event.resource.clone()
    }

    fn is_part_time(&self, resource: &Resource) -> bool {
        resource.is_part_time
    }

    fn minutes_on(&self, resource: &Resource, date: NaiveDate) -> Option<u32> {
        resource.minutes_by_date.get(&date).copied()
    }
}
