//! Registry invariant checker
//!
//! Walks the full observable state of a registry and reports every
//! inconsistency instead of stopping at the first one.

use arrival_contracts::events::ArrivalEvent;
use arrival_contracts::index::SecondaryIndex;
use arrival_contracts::registry::ArrivalRegistry;
use arrival_types::ids::{EventId, VoyageNoticeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Violation {
    /// Event at `position` (0-based) does not carry id `position + 1`
    NonContiguousId { position: usize, found: EventId },
    /// Digest chain broken starting at this event
    BrokenDigestChain { event_id: EventId },
    /// Event id indexed a number of times other than once under its key
    IndexCount {
        index: String,
        key: String,
        event_id: EventId,
        count: usize,
    },
    /// Index entry pointing at a missing event or at an event with another key
    StrayIndexEntry {
        index: String,
        key: String,
        event_id: EventId,
    },
    /// Index sequence not strictly ascending
    UnorderedIndex { index: String, key: String },
    /// Current record disagrees with the last event for its id
    RecordMismatch { voyage_notice_id: VoyageNoticeId },
    /// Record present without any event for its id
    RecordWithoutEvent { voyage_notice_id: VoyageNoticeId },
    /// Events exist for an id that has no record
    MissingRecord { voyage_notice_id: VoyageNoticeId },
}

/// Check every invariant and return all violations found.
pub fn check(registry: &ArrivalRegistry) -> Vec<Violation> {
    let mut violations = Vec::new();
    let events = registry.events();

    for (position, event) in events.iter().enumerate() {
        if event.event_id.value() != position as u64 + 1 {
            violations.push(Violation::NonContiguousId {
                position,
                found: event.event_id,
            });
        }
    }

    if let Some(event_id) = registry.first_invalid_event() {
        violations.push(Violation::BrokenDigestChain { event_id });
    }

    check_index(
        registry,
        "ship",
        registry.ship_index(),
        |event| event.call_reference.as_str(),
        &mut violations,
    );
    check_index(
        registry,
        "port",
        registry.port_index(),
        |event| event.port_code.as_str(),
        &mut violations,
    );
    check_records(registry, &mut violations);

    violations
}

fn check_index<F>(
    registry: &ArrivalRegistry,
    name: &str,
    index: &SecondaryIndex,
    key_of: F,
    violations: &mut Vec<Violation>,
) where
    F: Fn(&ArrivalEvent) -> &str,
{
    for (key, ids) in index.iter() {
        if !ids.windows(2).all(|pair| pair[0] < pair[1]) {
            violations.push(Violation::UnorderedIndex {
                index: name.to_string(),
                key: key.to_string(),
            });
        }
        for event_id in ids {
            let matches_key = registry
                .event(*event_id)
                .map(|event| key_of(event) == key)
                .unwrap_or(false);
            if !matches_key {
                violations.push(Violation::StrayIndexEntry {
                    index: name.to_string(),
                    key: key.to_string(),
                    event_id: *event_id,
                });
            }
        }
    }

    for event in registry.events() {
        let key = key_of(event);
        let count = index
            .lookup(key)
            .iter()
            .filter(|id| **id == event.event_id)
            .count();
        if count != 1 {
            violations.push(Violation::IndexCount {
                index: name.to_string(),
                key: key.to_string(),
                event_id: event.event_id,
                count,
            });
        }
    }
}

fn check_records(registry: &ArrivalRegistry, violations: &mut Vec<Violation>) {
    let mut last_event = HashMap::new();
    for event in registry.events() {
        last_event.insert(event.voyage_notice_id, event);
    }

    for record in registry.records() {
        match last_event.get(&record.voyage_notice_id) {
            Some(event) => {
                if event.call_reference != record.call_reference
                    || event.port_code != record.port_code
                    || event.committed_at != record.recorded_at
                {
                    violations.push(Violation::RecordMismatch {
                        voyage_notice_id: record.voyage_notice_id,
                    });
                }
            }
            None => violations.push(Violation::RecordWithoutEvent {
                voyage_notice_id: record.voyage_notice_id,
            }),
        }
    }

    let mut orphaned: Vec<VoyageNoticeId> = last_event
        .keys()
        .filter(|id| !registry.arrival_exists(**id))
        .copied()
        .collect();
    orphaned.sort();
    violations.extend(
        orphaned
            .into_iter()
            .map(|voyage_notice_id| Violation::MissingRecord { voyage_notice_id }),
    );
}
