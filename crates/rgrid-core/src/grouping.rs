//! Resource indexing and event grouping.
//!
//! [`Resources`] wraps the caller's (possibly absent) resource list and is the
//! single place that decides which bucket an event belongs to.
//!
//! # Bucket rules
//!
//! 1. No resource list: every event goes to [`ResourceKey::None`], untouched
//! 2. Event booked on a part-time resource: [`ResourceKey::Other`]
//! 3. Event booked on any other resource: [`ResourceKey::Explicit`]
//! 4. Event without a resource: [`ResourceKey::None`]

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::accessors::Accessors;

/// Bucket and header-context key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKey<Id> {
    /// A concrete resource.
    Explicit(Id),
    /// No resource context: no resource list, or an unbound event.
    None,
    /// Catch-all bucket for part-time resources.
    Other,
}

/// Sentinels are bracketed (`[none]`, `[other]`) so they never read like a
/// resource id.
impl<Id: fmt::Display> fmt::Display for ResourceKey<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(id) => write!(f, "{id}"),
            Self::None => write!(f, "[none]"),
            Self::Other => write!(f, "[other]"),
        }
    }
}

/// One entry yielded by [`Resources::map`].
#[derive(Debug)]
pub struct ResourceEntry<'a, Id, R> {
    /// Identity of the entry; [`ResourceKey::None`] for the synthetic context.
    pub key: ResourceKey<Id>,
    /// The resource itself; absent for the synthetic context.
    pub resource: Option<&'a R>,
}

/// Indexing and grouping over an optional resource list.
pub struct Resources<'a, A: Accessors> {
    resources: Option<&'a [A::Resource]>,
    accessors: &'a A,
}

impl<A: Accessors> Clone for Resources<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Accessors> Copy for Resources<'_, A> {}

impl<'a, A: Accessors> Resources<'a, A> {
    /// Wraps `resources`; `None` means the calendar has no resource dimension.
    pub const fn new(resources: Option<&'a [A::Resource]>, accessors: &'a A) -> Self {
        Self {
            resources,
            accessors,
        }
    }

    /// The accessors this index was built with.
    pub const fn accessors(&self) -> &'a A {
        self.accessors
    }

    /// Whether a resource list was supplied at all.
    pub const fn is_present(&self) -> bool {
        self.resources.is_some()
    }

    /// Number of supplied resources (0 when absent).
    pub fn len(&self) -> usize {
        self.resources.map_or(0, <[A::Resource]>::len)
    }

    /// Whether no resources were supplied, or the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `f` to every resource in input order.
    ///
    /// Without a resource list `f` runs exactly once, with the synthetic
    /// [`ResourceKey::None`] entry at index 0.
    pub fn map<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(ResourceEntry<'a, A::Id, A::Resource>, usize) -> T,
    {
        let Some(resources) = self.resources else {
            let entry = ResourceEntry {
                key: ResourceKey::None,
                resource: None,
            };
            return vec![f(entry, 0)];
        };

        resources
            .iter()
            .enumerate()
            .map(|(idx, resource)| {
                let entry = ResourceEntry {
                    key: ResourceKey::Explicit(self.accessors.resource_id(resource)),
                    resource: Some(resource),
                };
                f(entry, idx)
            })
            .collect()
    }

    /// Ids of the resources flagged part-time.
    pub fn part_time_ids(&self) -> HashSet<A::Id> {
        self.resources
            .unwrap_or_default()
            .iter()
            .filter(|resource| self.accessors.is_part_time(resource))
            .map(|resource| self.accessors.resource_id(resource))
            .collect()
    }

    /// Partitions `events` into buckets keyed by resource.
    pub fn group_events<'e>(
        &self,
        events: &'e [A::Event],
        part_time_ids: &HashSet<A::Id>,
    ) -> EventBuckets<'e, A::Id, A::Event> {
        let mut buckets = EventBuckets::new();

        if self.resources.is_none() {
            buckets.insert_all(ResourceKey::None, events);
            tracing::debug!(events = events.len(), "no resources, passing events through");
            return buckets;
        }

        for event in events {
            let key = match self.accessors.event_resource(event) {
                Some(id) if part_time_ids.contains(&id) => ResourceKey::Other,
                Some(id) => ResourceKey::Explicit(id),
                None => ResourceKey::None,
            };
            buckets.push(key, event);
        }

        tracing::debug!(
            resources = self.len(),
            part_time = part_time_ids.len(),
            events = events.len(),
            buckets = buckets.len(),
            "grouped events by resource"
        );
        buckets
    }
}

/// Events partitioned by [`ResourceKey`], iterated in first-insertion order.
#[derive(Debug, Clone)]
pub struct EventBuckets<'e, Id, E> {
    buckets: Vec<(ResourceKey<Id>, Vec<&'e E>)>,
    index: HashMap<ResourceKey<Id>, usize>,
}

impl<'e, Id: Clone + Eq + Hash, E> EventBuckets<'e, Id, E> {
    fn new() -> Self {
        Self {
            buckets: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn slot(&mut self, key: ResourceKey<Id>) -> &mut Vec<&'e E> {
        let idx = *self.index.entry(key.clone()).or_insert_with(|| {
            self.buckets.push((key, Vec::new()));
            self.buckets.len() - 1
        });
        &mut self.buckets[idx].1
    }

    fn push(&mut self, key: ResourceKey<Id>, event: &'e E) {
        self.slot(key).push(event);
    }

    fn insert_all(&mut self, key: ResourceKey<Id>, events: &'e [E]) {
        self.slot(key).extend(events);
    }

    /// Events in the bucket for `key`, in input order.
    pub fn get(&self, key: &ResourceKey<Id>) -> Option<&[&'e E]> {
        self.index.get(key).map(|&idx| self.buckets[idx].1.as_slice())
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no bucket was created.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &ResourceKey<Id>> {
        self.buckets.iter().map(|(key, _)| key)
    }

    /// Buckets in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKey<Id>, &[&'e E])> {
        self.buckets
            .iter()
            .map(|(key, events)| (key, events.as_slice()))
    }

    /// Total number of events across all buckets.
    pub fn event_count(&self) -> usize {
        self.buckets.iter().map(|(_, events)| events.len()).sum()
    }
}
