//! Secondary indices from call reference / port code to event ids
//!
//! Indices only grow. When a record moves to a new call reference or port,
//! its older entries stay under the previous key as audit history.

use arrival_types::ids::EventId;
use std::collections::HashMap;

/// Ordered event ids per secondary key.
#[derive(Debug, Default)]
pub struct SecondaryIndex {
    entries: HashMap<String, Vec<EventId>>,
}

/// Index keyed by call reference.
pub type ShipIndex = SecondaryIndex;

/// Index keyed by port code.
pub type PortIndex = SecondaryIndex;

impl SecondaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event_id` to the sequence for `key`, creating it on first use.
    pub fn append_event(&mut self, key: &str, event_id: EventId) {
        match self.entries.get_mut(key) {
            Some(ids) => ids.push(event_id),
            None => {
                self.entries.insert(key.to_string(), vec![event_id]);
            }
        }
    }

    /// Event ids for `key` in commit order; empty if never indexed.
    pub fn lookup(&self, key: &str) -> &[EventId] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of indexed event ids across all keys.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EventId])> {
        self.entries
            .iter()
            .map(|(key, ids)| (key.as_str(), ids.as_slice()))
    }
}
