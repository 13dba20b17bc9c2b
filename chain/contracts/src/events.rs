//! Registry events and notifications
//!
//! `ArrivalEvent` is the immutable log entry appended on every committed
//! mutation. Notifications are what external observers see; each commit
//! emits exactly one `ArrivalRecorded` followed by one `EventRecorded`.

use arrival_types::arrival::ArrivalRecord;
use arrival_types::ids::{EventId, VoyageNoticeId};
use serde::{Deserialize, Serialize};

/// Whether a commit created the record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Created,
    Updated,
}

impl EventKind {
    /// Stable byte tag used in the digest chain.
    pub(crate) fn tag(&self) -> u8 {
        match self {
            EventKind::Created => 0x01,
            EventKind::Updated => 0x02,
        }
    }
}

/// One committed mutation in the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalEvent {
    pub event_id: EventId,
    pub voyage_notice_id: VoyageNoticeId,
    pub call_reference: String,
    pub port_code: String,
    pub kind: EventKind,
    pub committed_at: i64,
    /// SHA-256 over the previous digest and this event's fields
    pub digest: [u8; 32],
}

impl ArrivalEvent {
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Full record as committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalRecorded {
    pub record: ArrivalRecord,
}

/// New event id with the keys it was indexed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecorded {
    pub event_id: EventId,
    pub voyage_notice_id: VoyageNoticeId,
    pub call_reference: String,
    pub port_code: String,
    pub kind: EventKind,
}

/// Enum wrapper for all registry notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    ArrivalRecorded(ArrivalRecorded),
    EventRecorded(EventRecorded),
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrival_types::arrival::ArrivalDetails;

    #[test]
    fn test_arrival_recorded_serialization() {
        let record = ArrivalRecord::from_details(
            VoyageNoticeId::new(12345),
            ArrivalDetails::new("ESC001", "Casablanca", "CASA", "Test Ship", "EN_ATTENTE"),
            1_708_123_456_789,
        );
        let notification = Notification::ArrivalRecorded(ArrivalRecorded { record });
        let json = serde_json::to_string(&notification).unwrap();
        let deser: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(notification, deser);
    }

    #[test]
    fn test_event_recorded_variant() {
        let notification = Notification::EventRecorded(EventRecorded {
            event_id: EventId::FIRST,
            voyage_notice_id: VoyageNoticeId::new(12345),
            call_reference: "ESC001".to_string(),
            port_code: "CASA".to_string(),
            kind: EventKind::Created,
        });
        assert!(matches!(notification, Notification::EventRecorded(_)));
    }

    #[test]
    fn test_kind_tags_distinct() {
        assert_ne!(EventKind::Created.tag(), EventKind::Updated.tag());
    }

    #[test]
    fn test_digest_hex() {
        let event = ArrivalEvent {
            event_id: EventId::FIRST,
            voyage_notice_id: VoyageNoticeId::new(1),
            call_reference: "ESC001".to_string(),
            port_code: "CASA".to_string(),
            kind: EventKind::Created,
            committed_at: 0,
            digest: [0xab; 32],
        };
        assert_eq!(event.digest_hex().len(), 64);
        assert!(event.digest_hex().starts_with("abab"));
    }
}
