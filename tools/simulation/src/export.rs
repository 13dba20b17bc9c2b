//! Report export
//!
//! Serializes scenario results, run metrics and the final registry
//! snapshot to JSON for external consumption.

use serde::{Deserialize, Serialize};

use crate::metrics::RunMetrics;
use crate::replay::{RegistrySnapshot, ReplayValidation};
use crate::scenarios::ScenarioResult;

/// Combined export containing all simulation outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationExport {
    pub version: String,
    pub seed: u64,
    pub scenarios: Vec<ScenarioResult>,
    pub metrics: RunMetrics,
    pub snapshot: RegistrySnapshot,
    pub replay: ReplayValidation,
}

impl SimulationExport {
    /// Whether every scenario passed and replay reproduced the registry.
    pub fn passed(&self) -> bool {
        self.scenarios.iter().all(|s| s.passed) && self.replay.matches
    }
}

/// Build a complete simulation export.
pub fn build_export(
    seed: u64,
    scenarios: Vec<ScenarioResult>,
    metrics: RunMetrics,
    snapshot: RegistrySnapshot,
    replay: ReplayValidation,
) -> SimulationExport {
    SimulationExport {
        version: crate::VERSION.to_string(),
        seed,
        scenarios,
        metrics,
        snapshot,
        replay,
    }
}

/// Export complete simulation data as JSON.
pub fn export_json(export: &SimulationExport) -> String {
    serde_json::to_string_pretty(export).unwrap_or_default()
}

/// Write export to a file path.
pub fn write_to_file(export: &SimulationExport, path: &str) -> std::io::Result<()> {
    let json = export_json(export);
    std::fs::write(path, json)
}
