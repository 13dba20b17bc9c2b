//! Scenario simulation modules
//!
//! Each scenario drives a registry the way an external caller would and
//! reports whether the observed behavior matched expectations.

pub mod port_call;
pub mod load;

use arrival_contracts::registry::ArrivalRegistry;
use serde::{Deserialize, Serialize};

/// Result of a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub operations: u64,
    pub events_emitted: u64,
    pub passed: bool,
    pub details: String,
}

impl ScenarioResult {
    /// Build a result from the failures collected while running.
    pub(crate) fn from_failures(
        name: &str,
        operations: u64,
        registry: &ArrivalRegistry,
        failures: Vec<String>,
    ) -> Self {
        let passed = failures.is_empty();
        let details = if passed {
            "ok".to_string()
        } else {
            failures.join("; ")
        };
        Self {
            name: name.to_string(),
            operations,
            events_emitted: registry.event_count(),
            passed,
            details,
        }
    }
}
