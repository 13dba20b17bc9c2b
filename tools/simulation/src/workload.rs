//! Seeded workload generator
//!
//! Produces a deterministic stream of registry calls over small pools of
//! voyage ids, call references and port codes so that ids get rewritten,
//! records move between keys, and some calls are expected to be rejected.

use arrival_types::arrival::ArrivalDetails;
use arrival_types::ids::VoyageNoticeId;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Identity issuing a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caller {
    Owner,
    Intruder,
}

/// Registry entry point to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallKind {
    Record,
    Update,
}

/// One generated registry call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub caller: Caller,
    pub kind: CallKind,
    pub voyage_notice_id: VoyageNoticeId,
    pub details: ArrivalDetails,
}

/// Workload shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub seed: u64,
    pub operations: usize,
    /// Voyage ids are drawn from `1..=id_pool`
    pub id_pool: u64,
    pub call_references: Vec<String>,
    pub port_codes: Vec<String>,
    pub statuses: Vec<String>,
    /// Probability that a call comes from a non-owner (0.0 to 1.0)
    pub intruder_ratio: f64,
    /// Probability that a call is an update rather than a record
    pub update_ratio: f64,
    /// Probability that an update targets an id outside the pool
    pub missing_update_ratio: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            operations: 1_000,
            id_pool: 50,
            call_references: (1..=20).map(|n| format!("ESC{n:03}")).collect(),
            port_codes: ["CASA", "TNG", "AGA", "NDR", "JLS", "SAF"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            statuses: ["EN_ATTENTE", "ARRIVE", "A_QUAI", "PARTI"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            intruder_ratio: 0.05,
            update_ratio: 0.4,
            missing_update_ratio: 0.1,
        }
    }
}

/// Deterministic generator of registry calls.
pub struct WorkloadGenerator {
    pub config: WorkloadConfig,
    rng: ChaCha8Rng,
}

impl WorkloadGenerator {
    pub fn new(config: WorkloadConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Generate the next call.
    pub fn next_operation(&mut self) -> Operation {
        let caller = if self.rng.gen_bool(self.config.intruder_ratio) {
            Caller::Intruder
        } else {
            Caller::Owner
        };
        let kind = if self.rng.gen_bool(self.config.update_ratio) {
            CallKind::Update
        } else {
            CallKind::Record
        };

        let pool = self.config.id_pool.max(1);
        let raw_id = if kind == CallKind::Update && self.rng.gen_bool(self.config.missing_update_ratio) {
            // Ids past the pool are never recorded
            pool + self.rng.gen_range(1..=pool)
        } else {
            self.rng.gen_range(1..=pool)
        };

        let details = ArrivalDetails::new(
            pick(&mut self.rng, &self.config.call_references, "ESC000"),
            "Port",
            pick(&mut self.rng, &self.config.port_codes, "CASA"),
            format!("Vessel {raw_id}"),
            pick(&mut self.rng, &self.config.statuses, "EN_ATTENTE"),
        );

        Operation {
            caller,
            kind,
            voyage_notice_id: VoyageNoticeId::new(raw_id),
            details,
        }
    }

    /// Generate the whole configured workload.
    pub fn generate(&mut self) -> Vec<Operation> {
        (0..self.config.operations).map(|_| self.next_operation()).collect()
    }
}

fn pick(rng: &mut ChaCha8Rng, pool: &[String], fallback: &str) -> String {
    pool.choose(rng).cloned().unwrap_or_else(|| fallback.to_string())
}
