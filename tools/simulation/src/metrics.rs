//! Run metrics for simulation
//!
//! Counts committed and rejected registry calls by outcome.

use arrival_contracts::errors::RegistryError;
use arrival_contracts::events::EventKind;
use serde::{Deserialize, Serialize};

/// Aggregated call outcomes for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub operations: u64,
    pub created: u64,
    pub updated: u64,
    pub unauthorized: u64,
    pub not_found: u64,
    pub exhausted: u64,
    pub elapsed_ns: u64,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed call.
    pub fn record_commit(&mut self, kind: EventKind) {
        self.operations += 1;
        match kind {
            EventKind::Created => self.created += 1,
            EventKind::Updated => self.updated += 1,
        }
    }

    /// Record a rejected call.
    pub fn record_rejection(&mut self, error: &RegistryError) {
        self.operations += 1;
        match error {
            RegistryError::Unauthorized { .. } => self.unauthorized += 1,
            RegistryError::NotFound { .. } => self.not_found += 1,
            RegistryError::EventIdExhausted { .. } => self.exhausted += 1,
        }
    }

    pub fn committed(&self) -> u64 {
        self.created + self.updated
    }

    pub fn rejected(&self) -> u64 {
        self.unauthorized + self.not_found + self.exhausted
    }

    /// Committed calls per second.
    pub fn throughput(&self) -> f64 {
        if self.elapsed_ns == 0 {
            return 0.0;
        }
        self.committed() as f64 / (self.elapsed_ns as f64 / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrival_types::ids::VoyageNoticeId;

    #[test]
    fn test_counts_by_outcome() {
        let mut metrics = RunMetrics::new();
        metrics.record_commit(EventKind::Created);
        metrics.record_commit(EventKind::Updated);
        metrics.record_commit(EventKind::Updated);
        metrics.record_rejection(&RegistryError::Unauthorized {
            caller: "0xuser".to_string(),
        });
        metrics.record_rejection(&RegistryError::NotFound {
            voyage_notice_id: VoyageNoticeId::new(1),
        });

        assert_eq!(metrics.operations, 5);
        assert_eq!(metrics.committed(), 3);
        assert_eq!(metrics.rejected(), 2);
        assert_eq!(metrics.updated, 2);
    }

    #[test]
    fn test_throughput_without_elapsed() {
        let metrics = RunMetrics::new();
        assert_eq!(metrics.throughput(), 0.0);
    }

    #[test]
    fn test_throughput() {
        let mut metrics = RunMetrics::new();
        metrics.record_commit(EventKind::Created);
        metrics.record_commit(EventKind::Created);
        metrics.elapsed_ns = 1_000_000_000;
        assert_eq!(metrics.throughput(), 2.0);
    }
}
