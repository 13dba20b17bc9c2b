//! Determinism tests
//!
//! Same seed → same log, same digest chain; any seed → no invariant
//! violations; exported notifications replay to the same registry.

use arrival_simulation::invariants;
use arrival_simulation::replay::{capture_snapshot, validate_replay};
use arrival_simulation::scenarios::load::{self, LoadConfig};
use arrival_simulation::workload::WorkloadConfig;
use proptest::prelude::*;

fn config(seed: u64, operations: usize) -> LoadConfig {
    LoadConfig {
        workload: WorkloadConfig {
            seed,
            operations,
            ..WorkloadConfig::default()
        },
        ..LoadConfig::default()
    }
}

#[test]
fn test_same_seed_same_registry() {
    let (_, _, first) = load::run(&config(1234, 500));
    let (_, _, second) = load::run(&config(1234, 500));
    assert_eq!(first.events(), second.events());
    assert_eq!(capture_snapshot(&first), capture_snapshot(&second));
}

#[test]
fn test_different_seed_different_chain() {
    let (_, _, first) = load::run(&config(1, 200));
    let (_, _, second) = load::run(&config(2, 200));
    assert_ne!(first.head_digest(), second.head_digest());
}

#[test]
fn test_replay_of_load_run() {
    let load_config = config(99, 800);
    let (result, _, registry) = load::run(&load_config);
    assert!(result.passed, "{}", result.details);
    let validation = validate_replay(&load_config.owner, registry.notifications(), &capture_snapshot(&registry));
    assert!(validation.matches);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Invariant: no seed produces an inconsistent registry.
    #[test]
    fn fuzz_any_seed_is_consistent(seed in any::<u64>()) {
        let (result, metrics, registry) = load::run(&config(seed, 150));
        prop_assert!(result.passed, "{}", result.details);
        prop_assert!(invariants::check(&registry).is_empty());
        prop_assert_eq!(metrics.committed(), registry.event_count());
    }
}
