//! Port-call acceptance scenarios
//!
//! The behaviors the deployed registry must show to the ship management
//! service, each run against a freshly deployed registry.

use arrival_contracts::errors::RegistryError;
use arrival_contracts::events::Notification;
use arrival_contracts::registry::ArrivalRegistry;
use arrival_types::arrival::ArrivalDetails;
use arrival_types::ids::VoyageNoticeId;
use serde::{Deserialize, Serialize};

use crate::scenarios::ScenarioResult;

/// Identities and clock used by the scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortCallConfig {
    pub owner: String,
    pub intruder: String,
    /// Commit time of the first call (unix millis)
    pub base_time: i64,
}

impl Default for PortCallConfig {
    fn default() -> Self {
        Self {
            owner: "0x627306090abab3a6e1400e9345bc60c78a8bef57".to_string(),
            intruder: "0xf17f52151ebef6c7334fad080c5704d77216b732".to_string(),
            base_time: 1_700_000_000_000,
        }
    }
}

const NOTICE: u64 = 12345;
const UNKNOWN_NOTICE: u64 = 99999;

fn casablanca() -> ArrivalDetails {
    ArrivalDetails::new("ESC001", "Casablanca", "CASA", "Test Ship", "EN_ATTENTE")
}

fn tanger(vessel: &str, status: &str) -> ArrivalDetails {
    ArrivalDetails::new("ESC002", "Tanger", "TNG", vessel, status)
}

fn expect(failures: &mut Vec<String>, condition: bool, message: &str) {
    if !condition {
        failures.push(message.to_string());
    }
}

/// Deploy and record the standard Casablanca notice.
fn deploy_with_notice(config: &PortCallConfig, failures: &mut Vec<String>) -> ArrivalRegistry {
    let mut registry = ArrivalRegistry::new(config.owner.as_str());
    if let Err(err) = registry.record_arrival(
        &config.owner,
        VoyageNoticeId::new(NOTICE),
        casablanca(),
        config.base_time,
    ) {
        failures.push(format!("initial record failed: {err}"));
    }
    registry
}

pub fn deployment(config: &PortCallConfig) -> ScenarioResult {
    let registry = ArrivalRegistry::new(config.owner.as_str());
    let mut failures = Vec::new();
    expect(&mut failures, registry.owner() == config.owner, "owner should be the deployer");
    expect(&mut failures, registry.event_count() == 0, "fresh registry should have no events");
    ScenarioResult::from_failures("deployment", 0, &registry, failures)
}

pub fn record_new(config: &PortCallConfig) -> ScenarioResult {
    let mut failures = Vec::new();
    let registry = deploy_with_notice(config, &mut failures);
    let id = VoyageNoticeId::new(NOTICE);

    let emitted = registry
        .notifications()
        .iter()
        .any(|n| matches!(n, Notification::ArrivalRecorded(_)));
    expect(&mut failures, emitted, "ArrivalRecorded should be emitted");
    expect(&mut failures, registry.arrival_exists(id), "arrival should exist");
    match registry.get_arrival(id) {
        Ok(record) => {
            expect(&mut failures, record.voyage_notice_id == id, "voyage notice id should match");
            expect(&mut failures, record.details() == casablanca(), "fields should match");
        }
        Err(err) => failures.push(format!("get_arrival failed: {err}")),
    }
    ScenarioResult::from_failures("record_new", 1, &registry, failures)
}

pub fn rerecord_same_id(config: &PortCallConfig) -> ScenarioResult {
    let mut failures = Vec::new();
    let mut registry = deploy_with_notice(config, &mut failures);
    let id = VoyageNoticeId::new(NOTICE);
    let replacement = tanger("Another Ship", "EN_ATTENTE");

    match registry.record_arrival(&config.owner, id, replacement.clone(), config.base_time + 1) {
        Ok(_) => match registry.get_arrival(id) {
            Ok(record) => expect(
                &mut failures,
                record.details() == replacement,
                "all fields should be replaced",
            ),
            Err(err) => failures.push(format!("get_arrival failed: {err}")),
        },
        Err(err) => failures.push(format!("re-record failed: {err}")),
    }
    expect(&mut failures, registry.record_count() == 1, "one record per id");
    ScenarioResult::from_failures("rerecord_same_id", 2, &registry, failures)
}

pub fn update_existing(config: &PortCallConfig) -> ScenarioResult {
    let mut failures = Vec::new();
    let mut registry = deploy_with_notice(config, &mut failures);
    let id = VoyageNoticeId::new(NOTICE);
    let update = tanger("Updated Ship", "ARRIVE");

    match registry.update_arrival(&config.owner, id, update.clone(), config.base_time + 1) {
        Ok(event_id) => {
            expect(
                &mut failures,
                registry.get_ship_events("ESC002") == [event_id],
                "update should be indexed under the new call reference",
            );
            match registry.get_arrival(id) {
                Ok(record) => expect(&mut failures, record.details() == update, "fields should be updated"),
                Err(err) => failures.push(format!("get_arrival failed: {err}")),
            }
        }
        Err(err) => failures.push(format!("update failed: {err}")),
    }
    ScenarioResult::from_failures("update_existing", 2, &registry, failures)
}

pub fn update_missing(config: &PortCallConfig) -> ScenarioResult {
    let mut registry = ArrivalRegistry::new(config.owner.as_str());
    let mut failures = Vec::new();
    let result = registry.update_arrival(
        &config.owner,
        VoyageNoticeId::new(UNKNOWN_NOTICE),
        tanger("Another Ship", "EN_ATTENTE"),
        config.base_time,
    );
    expect(
        &mut failures,
        matches!(result, Err(RegistryError::NotFound { .. })),
        "update of an unknown notice should fail with NotFound",
    );
    expect(&mut failures, registry.event_count() == 0, "no event should be appended");
    ScenarioResult::from_failures("update_missing", 1, &registry, failures)
}

pub fn non_owner_update(config: &PortCallConfig) -> ScenarioResult {
    let mut failures = Vec::new();
    let mut registry = deploy_with_notice(config, &mut failures);
    let id = VoyageNoticeId::new(NOTICE);
    let result = registry.update_arrival(
        &config.intruder,
        id,
        tanger("Another Ship", "EN_ATTENTE"),
        config.base_time + 1,
    );
    expect(
        &mut failures,
        matches!(result, Err(RegistryError::Unauthorized { .. })),
        "non-owner update should fail with Unauthorized",
    );
    let unchanged = registry
        .get_arrival(id)
        .map(|record| record.details() == casablanca())
        .unwrap_or(false);
    expect(&mut failures, unchanged, "record should be unchanged");
    ScenarioResult::from_failures("non_owner_update", 2, &registry, failures)
}

pub fn ship_and_port_lookup(config: &PortCallConfig) -> ScenarioResult {
    let mut failures = Vec::new();
    let registry = deploy_with_notice(config, &mut failures);

    let emitted = registry.notifications().iter().find_map(|n| match n {
        Notification::EventRecorded(e) => Some(e.event_id),
        _ => None,
    });
    match emitted {
        Some(event_id) => {
            expect(
                &mut failures,
                registry.get_ship_events("ESC001") == [event_id],
                "ship events should hold the emitted id",
            );
            expect(
                &mut failures,
                registry.get_port_events("CASA") == [event_id],
                "port events should hold the emitted id",
            );
        }
        None => failures.push("EventRecorded should be emitted".to_string()),
    }
    ScenarioResult::from_failures("ship_and_port_lookup", 1, &registry, failures)
}

pub fn existence_check(config: &PortCallConfig) -> ScenarioResult {
    let mut failures = Vec::new();
    let registry = deploy_with_notice(config, &mut failures);
    expect(
        &mut failures,
        registry.arrival_exists(VoyageNoticeId::new(NOTICE)),
        "recorded notice should exist",
    );
    expect(
        &mut failures,
        !registry.arrival_exists(VoyageNoticeId::new(UNKNOWN_NOTICE)),
        "unknown notice should not exist",
    );
    ScenarioResult::from_failures("existence_check", 1, &registry, failures)
}

/// Run every port-call scenario.
pub fn run_all(config: &PortCallConfig) -> Vec<ScenarioResult> {
    vec![
        deployment(config),
        record_new(config),
        rerecord_same_id(config),
        update_existing(config),
        update_missing(config),
        non_owner_update(config),
        ship_and_port_lookup(config),
        existence_check(config),
    ]
}
