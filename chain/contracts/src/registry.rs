//! Arrival registry — owner-gated record store with an append-only event log
//!
//! Every successful mutation:
//! 1. replaces the record under its voyage notice id,
//! 2. appends exactly one event to the log,
//! 3. appends the event id to the ship index (call reference) and the port
//!    index (port code) of the values just written,
//! 4. emits `ArrivalRecorded` then `EventRecorded`.
//!
//! All preconditions are checked and the event is staged before any of
//! these writes happen, so a rejected call leaves no trace.

use arrival_types::arrival::{ArrivalDetails, ArrivalRecord};
use arrival_types::ids::{EventId, VoyageNoticeId};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::errors::{ConfigError, RegistryError};
use crate::events::{ArrivalEvent, ArrivalRecorded, EventKind, EventRecorded, Notification};
use crate::index::{PortIndex, ShipIndex};
use crate::log::{EventFields, EventLog};
use crate::security::AccessControl;
use crate::store::RecordStore;

/// Whether a write may create a missing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Upsert,
    UpdateOnly,
}

/// Port-call arrival registry.
///
/// Mutations take `&mut self`; the host serializes them. Reads take `&self`
/// and always observe fully committed state.
#[derive(Debug)]
pub struct ArrivalRegistry {
    access_control: AccessControl,
    records: RecordStore,
    log: EventLog,
    ship_index: ShipIndex,
    port_index: PortIndex,
    /// Emitted notifications (append-only until drained)
    notifications: Vec<Notification>,
}

impl ArrivalRegistry {
    /// Deploy a registry owned by `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self::deploy(RegistryConfig::new(owner))
    }

    /// Deploy a registry from configuration.
    ///
    /// Rejects a blank owner or an empty identifier space.
    pub fn with_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::deploy(config))
    }

    fn deploy(config: RegistryConfig) -> Self {
        info!(
            owner = %config.owner,
            max_events = config.max_events,
            "ArrivalRegistry deployed"
        );
        Self {
            access_control: AccessControl::new(config.owner),
            records: RecordStore::new(),
            log: EventLog::with_limit(config.max_events),
            ship_index: ShipIndex::new(),
            port_index: PortIndex::new(),
            notifications: Vec::new(),
        }
    }

    // ───────────────────────── Mutations ─────────────────────────

    /// Record an arrival, creating or fully replacing the record. Owner-only.
    ///
    /// Emits a `Created` event for a new id, `Updated` otherwise.
    pub fn record_arrival(
        &mut self,
        caller: &str,
        voyage_notice_id: VoyageNoticeId,
        details: ArrivalDetails,
        current_time: i64,
    ) -> Result<EventId, RegistryError> {
        self.commit(caller, voyage_notice_id, details, current_time, WriteMode::Upsert)
    }

    /// Replace an existing record. Owner-only; never creates a record.
    pub fn update_arrival(
        &mut self,
        caller: &str,
        voyage_notice_id: VoyageNoticeId,
        details: ArrivalDetails,
        current_time: i64,
    ) -> Result<EventId, RegistryError> {
        self.commit(caller, voyage_notice_id, details, current_time, WriteMode::UpdateOnly)
    }

    /// Single commit path shared by both mutations.
    fn commit(
        &mut self,
        caller: &str,
        voyage_notice_id: VoyageNoticeId,
        details: ArrivalDetails,
        current_time: i64,
        mode: WriteMode,
    ) -> Result<EventId, RegistryError> {
        if let Err(err) = self.access_control.authorize(caller) {
            warn!(caller, voyage_notice_id = %voyage_notice_id, "Rejected write from non-owner");
            return Err(err);
        }

        let existed = self.records.exists(voyage_notice_id);
        if mode == WriteMode::UpdateOnly && !existed {
            warn!(voyage_notice_id = %voyage_notice_id, "Rejected update of unknown arrival");
            return Err(RegistryError::NotFound { voyage_notice_id });
        }
        let kind = if existed {
            EventKind::Updated
        } else {
            EventKind::Created
        };

        let record = ArrivalRecord::from_details(voyage_notice_id, details, current_time);
        let event = self
            .log
            .stage(EventFields {
                voyage_notice_id,
                call_reference: &record.call_reference,
                port_code: &record.port_code,
                kind,
                committed_at: current_time,
            })
            .map_err(|err| {
                warn!(error = %err, "Event log exhausted");
                err
            })?;

        // Nothing below can fail.
        let event_id = self.log.commit(event);
        self.ship_index.append_event(&record.call_reference, event_id);
        self.port_index.append_event(&record.port_code, event_id);

        let recorded = EventRecorded {
            event_id,
            voyage_notice_id,
            call_reference: record.call_reference.clone(),
            port_code: record.port_code.clone(),
            kind,
        };
        self.notifications.push(Notification::ArrivalRecorded(ArrivalRecorded {
            record: record.clone(),
        }));
        self.notifications.push(Notification::EventRecorded(recorded));
        self.records.put(voyage_notice_id, record);

        debug!(
            event_id = event_id.value(),
            voyage_notice_id = %voyage_notice_id,
            kind = ?kind,
            "Arrival committed"
        );
        Ok(event_id)
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Current record for `voyage_notice_id`.
    pub fn get_arrival(&self, voyage_notice_id: VoyageNoticeId) -> Result<&ArrivalRecord, RegistryError> {
        self.records.get(voyage_notice_id)
    }

    pub fn arrival_exists(&self, voyage_notice_id: VoyageNoticeId) -> bool {
        self.records.exists(voyage_notice_id)
    }

    /// Event ids indexed under a call reference, in commit order.
    pub fn get_ship_events(&self, call_reference: &str) -> &[EventId] {
        self.ship_index.lookup(call_reference)
    }

    /// Event ids indexed under a port code, in commit order.
    pub fn get_port_events(&self, port_code: &str) -> &[EventId] {
        self.port_index.lookup(port_code)
    }

    /// Identity fixed at deployment.
    pub fn owner(&self) -> &str {
        self.access_control.owner()
    }

    // ───────────────────────── Log & verification ─────────────────────────

    pub fn event_count(&self) -> u64 {
        self.log.count_events()
    }

    /// All events in commit order.
    pub fn events(&self) -> &[ArrivalEvent] {
        self.log.as_slice()
    }

    pub fn event(&self, event_id: EventId) -> Option<&ArrivalEvent> {
        self.log.get(event_id)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Current records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &ArrivalRecord> {
        self.records.iter().map(|(_, record)| record)
    }

    /// Digest of the most recent event.
    pub fn head_digest(&self) -> [u8; 32] {
        self.log.head_digest()
    }

    /// Index keyed by call reference.
    pub fn ship_index(&self) -> &ShipIndex {
        &self.ship_index
    }

    /// Index keyed by port code.
    pub fn port_index(&self) -> &PortIndex {
        &self.port_index
    }

    /// First event whose id or digest fails recomputation, if any.
    pub fn first_invalid_event(&self) -> Option<EventId> {
        self.log.first_invalid()
    }

    /// Check the digest chain and that both indices hold every event once.
    pub fn verify_integrity(&self) -> bool {
        if !self.log.verify_chain() {
            return false;
        }
        let count = self.events().len();
        if self.ship_index.entry_count() != count || self.port_index.entry_count() != count {
            return false;
        }
        let ascending = |ids: &[EventId]| ids.windows(2).all(|pair| pair[0] < pair[1]);
        if !self.ship_index.iter().all(|(_, ids)| ascending(ids))
            || !self.port_index.iter().all(|(_, ids)| ascending(ids))
        {
            return false;
        }
        self.events().iter().all(|event| {
            self.ship_index
                .lookup(&event.call_reference)
                .binary_search(&event.event_id)
                .is_ok()
                && self
                    .port_index
                    .lookup(&event.port_code)
                    .binary_search(&event.event_id)
                    .is_ok()
        })
    }

    // ───────────────────────── Notifications ─────────────────────────

    /// Get all emitted notifications.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain all notifications (consume and clear).
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
