//! Event log — append-only, sequentially numbered, hash-chained
//!
//! Event ids start at 1 and are contiguous. Each event's digest covers the
//! previous digest, so rewriting any past entry breaks every later digest.

use arrival_types::ids::{EventId, VoyageNoticeId};
use sha2::{Digest, Sha256};

use crate::errors::RegistryError;
use crate::events::{ArrivalEvent, EventKind};

/// Digest preceding the first event.
pub const GENESIS_DIGEST: [u8; 32] = [0u8; 32];

/// Fields copied from the record at commit time.
#[derive(Debug, Clone, Copy)]
pub struct EventFields<'a> {
    pub voyage_notice_id: VoyageNoticeId,
    pub call_reference: &'a str,
    pub port_code: &'a str,
    pub kind: EventKind,
    pub committed_at: i64,
}

/// Append-only log of committed registry events.
#[derive(Debug)]
pub struct EventLog {
    entries: Vec<ArrivalEvent>,
    /// Size of the identifier space
    max_events: u64,
}

impl EventLog {
    /// Create an empty log using the full `u64` identifier space.
    pub fn new() -> Self {
        Self::with_limit(u64::MAX)
    }

    /// Create an empty log that accepts at most `max_events` events.
    pub fn with_limit(max_events: u64) -> Self {
        Self {
            entries: Vec::new(),
            max_events,
        }
    }

    /// Id the next appended event will receive.
    pub fn next_event_id(&self) -> Result<EventId, RegistryError> {
        let exhausted = RegistryError::EventIdExhausted {
            limit: self.max_events,
        };
        if self.count_events() >= self.max_events {
            return Err(exhausted);
        }
        match self.entries.last() {
            Some(last) => last.event_id.next().ok_or(exhausted),
            None => Ok(EventId::FIRST),
        }
    }

    /// Append an event and return its id.
    pub fn append(&mut self, fields: EventFields<'_>) -> Result<EventId, RegistryError> {
        let event = self.stage(fields)?;
        Ok(self.commit(event))
    }

    /// Build the next event without touching the log.
    pub(crate) fn stage(&self, fields: EventFields<'_>) -> Result<ArrivalEvent, RegistryError> {
        let event_id = self.next_event_id()?;
        let digest = compute_digest(&self.head_digest(), event_id, &fields);
        Ok(ArrivalEvent {
            event_id,
            voyage_notice_id: fields.voyage_notice_id,
            call_reference: fields.call_reference.to_string(),
            port_code: fields.port_code.to_string(),
            kind: fields.kind,
            committed_at: fields.committed_at,
            digest,
        })
    }

    /// Push an event produced by `stage` against the current tip.
    pub(crate) fn commit(&mut self, event: ArrivalEvent) -> EventId {
        debug_assert_eq!(Some(event.event_id), self.next_event_id().ok());
        let event_id = event.event_id;
        self.entries.push(event);
        event_id
    }

    pub fn count_events(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Events in commit order.
    pub fn iter(&self) -> impl Iterator<Item = &ArrivalEvent> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ArrivalEvent] {
        &self.entries
    }

    /// Look up an event by id.
    pub fn get(&self, event_id: EventId) -> Option<&ArrivalEvent> {
        let index = event_id.value().checked_sub(1)?;
        self.entries.get(usize::try_from(index).ok()?)
    }

    /// Digest of the last event, or the genesis digest when empty.
    pub fn head_digest(&self) -> [u8; 32] {
        self.entries
            .last()
            .map(|event| event.digest)
            .unwrap_or(GENESIS_DIGEST)
    }

    /// First event whose id or digest does not match a recomputation.
    pub fn first_invalid(&self) -> Option<EventId> {
        let mut previous = GENESIS_DIGEST;
        for (position, event) in self.entries.iter().enumerate() {
            let expected_id = EventId::new(position as u64 + 1);
            let fields = EventFields {
                voyage_notice_id: event.voyage_notice_id,
                call_reference: &event.call_reference,
                port_code: &event.port_code,
                kind: event.kind,
                committed_at: event.committed_at,
            };
            if event.event_id != expected_id
                || compute_digest(&previous, expected_id, &fields) != event.digest
            {
                return Some(expected_id);
            }
            previous = event.digest;
        }
        None
    }

    /// Recompute the whole chain.
    pub fn verify_chain(&self) -> bool {
        self.first_invalid().is_none()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Chain digest: SHA-256(previous || id || voyage id || call ref || port code || kind || time).
///
/// Strings are length-prefixed so adjacent fields cannot be shifted into
/// one another.
pub fn compute_digest(previous: &[u8; 32], event_id: EventId, fields: &EventFields<'_>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(previous);
    hasher.update(event_id.value().to_be_bytes());
    hasher.update(fields.voyage_notice_id.value().to_be_bytes());
    hasher.update((fields.call_reference.len() as u64).to_be_bytes());
    hasher.update(fields.call_reference.as_bytes());
    hasher.update((fields.port_code.len() as u64).to_be_bytes());
    hasher.update(fields.port_code.as_bytes());
    hasher.update([fields.kind.tag()]);
    hasher.update(fields.committed_at.to_be_bytes());
    hasher.finalize().into()
}
