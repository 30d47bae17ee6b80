//! Grid data files: resources and events as JSON.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rgrid_core::{DefaultAccessors, Event, Resource, ResourceId, Resources};
use serde::Deserialize;

/// Contents of a `--data` file.
///
/// ```json
/// {
///   "resources": [{"id": "a", "title": "Room A", "is_part_time": false}],
///   "events": [{"id": "1", "title": "Standup", "resource": "a"}]
/// }
/// ```
///
/// A missing or `null` `resources` key means the calendar has no resource
/// dimension.
#[derive(Debug, Default, Deserialize)]
pub struct GridData {
    #[serde(default)]
    pub resources: Option<Vec<Resource>>,

    #[serde(default)]
    pub events: Vec<Event>,

    /// Explicit part-time set; derived from `is_part_time` flags when absent.
    #[serde(default)]
    pub part_time_resource_ids: Option<Vec<ResourceId>>,
}

impl GridData {
    /// Reads and parses a data file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let data: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        tracing::debug!(
            resources = data.resources.as_ref().map(Vec::len),
            events = data.events.len(),
            "loaded grid data"
        );
        Ok(data)
    }

    /// Index over the loaded resources.
    pub fn index<'a>(&'a self, accessors: &'a DefaultAccessors) -> Resources<'a, DefaultAccessors> {
        Resources::new(self.resources.as_deref(), accessors)
    }

    /// The part-time id set used for grouping.
    pub fn part_time_ids(&self, index: &Resources<'_, DefaultAccessors>) -> HashSet<ResourceId> {
        match &self.part_time_resource_ids {
            Some(ids) => ids.iter().cloned().collect(),
            None => index.part_time_ids(),
        }
    }
}
