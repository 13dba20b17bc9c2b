//! Notification log and deterministic replay validation
//!
//! Rebuilding a registry from its exported `ArrivalRecorded` notifications
//! must reproduce the same log, including the digest chain.

use arrival_contracts::errors::RegistryError;
use arrival_contracts::events::Notification;
use arrival_contracts::registry::ArrivalRegistry;
use serde::{Deserialize, Serialize};

/// A snapshot of registry state for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub event_count: u64,
    pub record_count: usize,
    pub ship_keys: usize,
    pub port_keys: usize,
    pub head_digest: String,
}

/// Capture a snapshot of the registry state.
pub fn capture_snapshot(registry: &ArrivalRegistry) -> RegistrySnapshot {
    RegistrySnapshot {
        event_count: registry.event_count(),
        record_count: registry.record_count(),
        ship_keys: registry.ship_index().key_count(),
        port_keys: registry.port_index().key_count(),
        head_digest: hex::encode(registry.head_digest()),
    }
}

/// Replay recorded arrivals into a fresh registry owned by `owner`.
pub fn replay_notifications(
    owner: &str,
    notifications: &[Notification],
) -> Result<ArrivalRegistry, RegistryError> {
    let mut registry = ArrivalRegistry::new(owner);
    for notification in notifications {
        if let Notification::ArrivalRecorded(recorded) = notification {
            let record = &recorded.record;
            registry.record_arrival(owner, record.voyage_notice_id, record.details(), record.recorded_at)?;
        }
    }
    Ok(registry)
}

/// Result of replay validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayValidation {
    pub matches: bool,
    pub original: RegistrySnapshot,
    pub replayed: Option<RegistrySnapshot>,
}

/// Validate replay determinism: rebuild from notifications and compare.
pub fn validate_replay(
    owner: &str,
    notifications: &[Notification],
    expected: &RegistrySnapshot,
) -> ReplayValidation {
    let replayed = replay_notifications(owner, notifications)
        .ok()
        .map(|registry| capture_snapshot(&registry));
    ReplayValidation {
        matches: replayed.as_ref() == Some(expected),
        original: expected.clone(),
        replayed,
    }
}

/// Export notifications as JSON.
pub fn export_notifications(notifications: &[Notification]) -> String {
    serde_json::to_string_pretty(notifications).unwrap_or_default()
}

/// Import notifications from JSON.
pub fn import_notifications(json: &str) -> Result<Vec<Notification>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrival_types::arrival::ArrivalDetails;
    use arrival_types::ids::VoyageNoticeId;

    const OWNER: &str = "0xowner";

    fn populated() -> ArrivalRegistry {
        let mut registry = ArrivalRegistry::new(OWNER);
        let id = VoyageNoticeId::new(12345);
        registry
            .record_arrival(OWNER, id, ArrivalDetails::new("ESC001", "Casablanca", "CASA", "Ship", "awaiting"), 10)
            .unwrap();
        registry
            .update_arrival(OWNER, id, ArrivalDetails::new("ESC002", "Tanger", "TNG", "Ship", "arrived"), 20)
            .unwrap();
        registry
            .record_arrival(
                OWNER,
                VoyageNoticeId::new(2),
                ArrivalDetails::new("ESC003", "Agadir", "AGA", "Other", "awaiting"),
                30,
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_snapshot_of_empty_registry() {
        let snapshot = capture_snapshot(&ArrivalRegistry::new(OWNER));
        assert_eq!(snapshot.event_count, 0);
        assert_eq!(snapshot.head_digest, "0".repeat(64));
    }

    #[test]
    fn test_replay_reproduces_digest_chain() {
        let registry = populated();
        let expected = capture_snapshot(&registry);
        let validation = validate_replay(OWNER, registry.notifications(), &expected);
        assert!(validation.matches);
    }

    #[test]
    fn test_replay_through_json() {
        let registry = populated();
        let json = export_notifications(registry.notifications());
        let imported = import_notifications(&json).unwrap();
        let replayed = replay_notifications(OWNER, &imported).unwrap();
        assert_eq!(replayed.events(), registry.events());
    }

    #[test]
    fn test_truncated_replay_differs() {
        let registry = populated();
        let expected = capture_snapshot(&registry);
        let truncated = &registry.notifications()[..2];
        let validation = validate_replay(OWNER, truncated, &expected);
        assert!(!validation.matches);
    }
}
