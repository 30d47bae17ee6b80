//! Group command: events partitioned by resource.

use std::io::Write;

use anyhow::Result;
use rgrid_core::{DefaultAccessors, Event, EventBuckets, ResourceId, ResourceKey};
use serde::Serialize;

use crate::GroupArgs;
use crate::data::GridData;

#[derive(Debug, Serialize)]
struct BucketJson<'a> {
    key: &'a ResourceKey<ResourceId>,
    events: Vec<&'a Event>,
}

pub fn run<W: Write>(writer: &mut W, args: &GroupArgs) -> Result<()> {
    let data = GridData::load(&args.data)?;
    let accessors = DefaultAccessors;
    let index = data.index(&accessors);
    let part_time = data.part_time_ids(&index);

    let buckets = index.group_events(&data.events, &part_time);

    if args.json {
        let json: Vec<_> = buckets
            .iter()
            .map(|(key, events)| BucketJson {
                key,
                events: events.to_vec(),
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&json)?)?;
    } else {
        write!(writer, "{}", format_buckets(&buckets))?;
    }

    Ok(())
}

/// Formats buckets as a human-readable listing.
///
/// The `[none]` and `[other]` sentinels are bracketed; resource ids are not.
pub fn format_buckets(buckets: &EventBuckets<'_, ResourceId, Event>) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    if buckets.event_count() == 0 {
        writeln!(output, "No events.").unwrap();
        return output;
    }

    for (key, events) in buckets.iter() {
        writeln!(output, "{key} ({})", events.len()).unwrap();
        for event in events {
            if event.title.is_empty() {
                writeln!(output, "  - {}", event.id).unwrap();
            } else {
                writeln!(output, "  - {}  {}", event.id, event.title).unwrap();
            }
        }
    }

    output
}
