//! Seeded load scenario
//!
//! Applies a generated workload to a registry while tracking a
//! last-write-wins shadow model, then checks every registry invariant and
//! that the registry agrees with the model.

use arrival_contracts::registry::ArrivalRegistry;
use arrival_types::arrival::ArrivalDetails;
use arrival_types::ids::VoyageNoticeId;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};

use crate::invariants;
use crate::metrics::RunMetrics;
use crate::scenarios::ScenarioResult;
use crate::workload::{CallKind, Caller, Operation, WorkloadConfig, WorkloadGenerator};

/// Identities and clock for the load run.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub owner: String,
    pub intruder: String,
    pub base_time: i64,
    pub workload: WorkloadConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            owner: "0xowner".to_string(),
            intruder: "0xintruder".to_string(),
            base_time: 1_700_000_000_000,
            workload: WorkloadConfig::default(),
        }
    }
}

/// Apply `operations` to `registry`, one commit-time millisecond apart.
pub fn apply(
    registry: &mut ArrivalRegistry,
    config: &LoadConfig,
    operations: &[Operation],
) -> (RunMetrics, HashMap<VoyageNoticeId, ArrivalDetails>) {
    let mut metrics = RunMetrics::new();
    let mut model = HashMap::new();
    let started = Instant::now();

    for (step, op) in operations.iter().enumerate() {
        let caller = match op.caller {
            Caller::Owner => config.owner.as_str(),
            Caller::Intruder => config.intruder.as_str(),
        };
        let now = config.base_time + step as i64;
        let result = match op.kind {
            CallKind::Record => registry.record_arrival(caller, op.voyage_notice_id, op.details.clone(), now),
            CallKind::Update => registry.update_arrival(caller, op.voyage_notice_id, op.details.clone(), now),
        };
        match result {
            Ok(event_id) => {
                if let Some(event) = registry.event(event_id) {
                    metrics.record_commit(event.kind);
                }
                model.insert(op.voyage_notice_id, op.details.clone());
            }
            Err(err) => metrics.record_rejection(&err),
        }
    }

    metrics.elapsed_ns = started.elapsed().as_nanos() as u64;
    (metrics, model)
}

/// Generate the workload, run it against a fresh registry and verify.
pub fn run(config: &LoadConfig) -> (ScenarioResult, RunMetrics, ArrivalRegistry) {
    let operations = WorkloadGenerator::new(config.workload.clone()).generate();
    let mut registry = ArrivalRegistry::new(config.owner.as_str());
    let (metrics, model) = apply(&mut registry, config, &operations);

    let mut failures: Vec<String> = invariants::check(&registry)
        .into_iter()
        .map(|violation| format!("{violation:?}"))
        .collect();

    if metrics.committed() != registry.event_count() {
        failures.push(format!(
            "committed {} calls but log holds {} events",
            metrics.committed(),
            registry.event_count()
        ));
    }
    if model.len() != registry.record_count() {
        failures.push(format!(
            "model holds {} records, registry {}",
            model.len(),
            registry.record_count()
        ));
    }
    for (id, details) in &model {
        match registry.get_arrival(*id) {
            Ok(record) if record.details() == *details => {}
            Ok(_) => failures.push(format!("record {id} differs from last write")),
            Err(err) => failures.push(format!("record {id}: {err}")),
        }
    }

    if failures.is_empty() {
        info!(
            seed = config.workload.seed,
            committed = metrics.committed(),
            rejected = metrics.rejected(),
            "Load scenario passed"
        );
    } else {
        warn!(seed = config.workload.seed, failures = failures.len(), "Load scenario failed");
    }

    let result = ScenarioResult::from_failures("load", metrics.operations, &registry, failures);
    (result, metrics, registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_load_passes() {
        let (result, metrics, registry) = run(&LoadConfig::default());
        assert!(result.passed, "{}", result.details);
        assert_eq!(metrics.operations, 1_000);
        assert!(metrics.unauthorized > 0);
        assert!(metrics.not_found > 0);
        assert_eq!(result.events_emitted, registry.event_count());
    }

    #[test]
    fn test_owner_only_workload_has_no_unauthorized() {
        let config = LoadConfig {
            workload: WorkloadConfig {
                intruder_ratio: 0.0,
                operations: 300,
                ..WorkloadConfig::default()
            },
            ..LoadConfig::default()
        };
        let (result, metrics, _) = run(&config);
        assert!(result.passed, "{}", result.details);
        assert_eq!(metrics.unauthorized, 0);
    }
}
