//! Bundled resource and event types with validated identifiers.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated resource identifier.
    ///
    /// Resource IDs must be non-empty strings. An empty id in input data is
    /// treated as "no resource" and never reaches this type.
    ResourceId, "resource ID"
);

define_string_id!(
    /// A validated event identifier.
    EventId, "event ID"
);

/// A bookable resource (room, person, machine) shown as a header column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier.
    pub id: ResourceId,

    /// Display title for the header cell.
    #[serde(default)]
    pub title: String,

    /// Part-time resources get no header cell of their own; their events
    /// land in the "other" bucket.
    #[serde(default)]
    pub is_part_time: bool,

    /// Booked minutes per calendar day, shown next to the title.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub minutes_by_date: BTreeMap<NaiveDate, u32>,
}

impl Resource {
    /// Creates a full-time resource with no minute counts.
    pub fn new(id: ResourceId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            is_part_time: false,
            minutes_by_date: BTreeMap::new(),
        }
    }

    /// Marks the resource as part-time.
    #[must_use]
    pub const fn part_time(mut self) -> Self {
        self.is_part_time = true;
        self
    }

    /// Records the booked minutes for one day.
    #[must_use]
    pub fn with_minutes(mut self, date: NaiveDate, minutes: u32) -> Self {
        self.minutes_by_date.insert(date, minutes);
        self
    }
}

/// A calendar event, optionally bound to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event.
    pub id: EventId,

    /// Event title.
    #[serde(default)]
    pub title: String,

    /// The resource this event is booked on, if any.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_resource",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource: Option<ResourceId>,

    /// Start of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,

    /// End of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
}

impl Event {
    /// Creates an event booked on `resource`.
    pub fn new(id: EventId, title: impl Into<String>, resource: Option<ResourceId>) -> Self {
        Self {
            id,
            title: title.into(),
            resource,
            start: None,
            end: None,
        }
    }
}

/// Accepts `null`, `""` or a resource id; the first two mean "no resource".
fn deserialize_optional_resource<'de, D>(deserializer: D) -> Result<Option<ResourceId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| ResourceId::new(s).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_rejects_empty() {
        assert!(ResourceId::new("").is_err());
        assert!(ResourceId::new("room-a").is_ok());
    }

    #[test]
    fn resource_id_serde_rejects_empty() {
        let result: Result<ResourceId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn event_id_error_names_field() {
        let err = EventId::new("").unwrap_err();
        assert_eq!(err.to_string(), "event ID cannot be empty");
    }

    #[test]
    fn event_with_empty_resource_has_none() {
        let json = r#"{"id": "e1", "title": "Standup", "resource": ""}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.resource, None);

        let json = r#"{"id": "e2", "resource": null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.resource, None);
    }

    #[test]
    fn resource_parses_minutes_by_date() {
        let json = r#"{
            "id": "room-a",
            "title": "Room A",
            "minutes_by_date": {"2025-01-27": 90}
        }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();

        assert_eq!(resource.minutes_by_date.get(&day), Some(&90));
        assert!(!resource.is_part_time);
    }

    #[test]
    fn resource_builders() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        let resource = Resource::new(ResourceId::new("b").unwrap(), "Bob")
            .part_time()
            .with_minutes(day, 30);

        assert!(resource.is_part_time);
        assert_eq!(resource.minutes_by_date.get(&day), Some(&30));
    }
}
