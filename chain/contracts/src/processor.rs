//! Arrival notice processing
//!
//! Consumes arrival notices published by the ship management service and
//! records them in the registry on behalf of the owner. The message bus
//! delivers at least once, so notices are deduplicated by message id over a
//! bounded window of recently recorded messages.

use arrival_types::ids::EventId;
use arrival_types::notice::ArrivalNotice;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{RegistryConfig, DEFAULT_DEDUP_WINDOW};
use crate::errors::{ConfigError, ProcessorError};
use crate::registry::ArrivalRegistry;

/// Result of processing a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Committed to the registry under the given event id.
    Recorded(EventId),
    /// Already recorded; dropped without touching the registry.
    Duplicate,
}

/// Generic consumer of inbound events.
pub trait EventProcessor<T> {
    fn process(&mut self, event: T, current_time: i64) -> Result<ProcessOutcome, ProcessorError>;
}

/// Records arrival notices into an owned registry.
#[derive(Debug)]
pub struct ArrivalProcessor {
    registry: ArrivalRegistry,
    /// Identity used for registry writes
    submitter: String,
    /// Recently recorded message ids, oldest first
    recent: VecDeque<Uuid>,
    recent_set: HashSet<Uuid>,
    dedup_window: usize,
    notices_recorded: u64,
    duplicates_dropped: u64,
    notices_rejected: u64,
}

impl ArrivalProcessor {
    /// Create a processor writing to `registry` as `submitter`.
    pub fn new(registry: ArrivalRegistry, submitter: impl Into<String>, dedup_window: usize) -> Self {
        // The window fills lazily; cap the up-front allocation.
        let capacity = dedup_window.min(DEFAULT_DEDUP_WINDOW);
        Self {
            registry,
            submitter: submitter.into(),
            recent: VecDeque::with_capacity(capacity),
            recent_set: HashSet::with_capacity(capacity),
            dedup_window,
            notices_recorded: 0,
            duplicates_dropped: 0,
            notices_rejected: 0,
        }
    }

    /// Deploy a registry from `config` and submit as its owner.
    pub fn from_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        let submitter = config.owner.clone();
        let dedup_window = config.dedup_window;
        let registry = ArrivalRegistry::with_config(config)?;
        info!(dedup_window, "ArrivalProcessor initialized");
        Ok(Self::new(registry, submitter, dedup_window))
    }

    /// Parse and process a raw message body.
    pub fn process_json(&mut self, payload: &str, current_time: i64) -> Result<ProcessOutcome, ProcessorError> {
        let notice = match ArrivalNotice::from_json(payload) {
            Ok(notice) => notice,
            Err(err) => {
                self.notices_rejected += 1;
                warn!(error = %err, "Dropping malformed arrival notice");
                return Err(err.into());
            }
        };
        self.process(notice, current_time)
    }

    pub fn registry(&self) -> &ArrivalRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ArrivalRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> ArrivalRegistry {
        self.registry
    }

    pub fn notices_recorded(&self) -> u64 {
        self.notices_recorded
    }

    pub fn duplicates_dropped(&self) -> u64 {
        self.duplicates_dropped
    }

    pub fn notices_rejected(&self) -> u64 {
        self.notices_rejected
    }

    fn is_duplicate(&self, message_id: &Uuid) -> bool {
        self.recent_set.contains(message_id)
    }

    fn remember(&mut self, message_id: Uuid) {
        if self.dedup_window == 0 {
            return;
        }
        if self.recent.len() >= self.dedup_window {
            if let Some(oldest) = self.recent.pop_front() {
                self.recent_set.remove(&oldest);
            }
        }
        self.recent.push_back(message_id);
        self.recent_set.insert(message_id);
    }
}

impl EventProcessor<ArrivalNotice> for ArrivalProcessor {
    fn process(&mut self, notice: ArrivalNotice, current_time: i64) -> Result<ProcessOutcome, ProcessorError> {
        if self.is_duplicate(&notice.message_id) {
            self.duplicates_dropped += 1;
            debug!(message_id = %notice.message_id, "Dropping redelivered notice");
            return Ok(ProcessOutcome::Duplicate);
        }

        if let Err(err) = notice.validate() {
            self.notices_rejected += 1;
            warn!(message_id = %notice.message_id, error = %err, "Rejecting invalid notice");
            return Err(err.into());
        }

        let event_id = match self.registry.record_arrival(
            &self.submitter,
            notice.voyage_notice_id,
            notice.details(),
            current_time,
        ) {
            Ok(event_id) => event_id,
            Err(err) => {
                self.notices_rejected += 1;
                return Err(err.into());
            }
        };

        self.remember(notice.message_id);
        self.notices_recorded += 1;
        debug!(
            message_id = %notice.message_id,
            voyage_notice_id = %notice.voyage_notice_id,
            event_id = event_id.value(),
            "Notice recorded"
        );
        Ok(ProcessOutcome::Recorded(event_id))
    }
}
