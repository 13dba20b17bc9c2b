//! Identifier types for registry entities
//!
//! Voyage notice ids come from the port community system and are plain
//! integers; event ids are assigned by the registry at append time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of an arrival record.
///
/// Issued upstream, not required to be unique across time: the latest
/// write for a given id is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoyageNoticeId(u64);

impl VoyageNoticeId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw integer value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VoyageNoticeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for VoyageNoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential identifier of a committed registry event.
///
/// Starts at 1 and increases by exactly one per committed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// Id of the first event ever appended
    pub const FIRST: EventId = EventId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Next id in sequence, `None` once the identifier space is exhausted.
    pub fn next(&self) -> Option<EventId> {
        self.0.checked_add(1).map(EventId)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voyage_notice_id_display() {
        let id = VoyageNoticeId::new(12345);
        assert_eq!(id.to_string(), "12345");
        assert_eq!(VoyageNoticeId::from(12345), id);
    }

    #[test]
    fn test_voyage_notice_id_serializes_as_integer() {
        let id = VoyageNoticeId::new(99999);
        assert_eq!(serde_json::to_string(&id).unwrap(), "99999");
    }

    #[test]
    fn test_event_id_sequence() {
        let first = EventId::FIRST;
        assert_eq!(first.value(), 1);
        assert_eq!(first.next(), Some(EventId::new(2)));
        assert!(EventId::new(1) < EventId::new(2));
    }

    #[test]
    fn test_event_id_exhaustion() {
        assert_eq!(EventId::new(u64::MAX).next(), None);
    }

    #[test]
    fn test_event_id_display() {
        assert_eq!(EventId::new(7).to_string(), "#7");
    }
}
