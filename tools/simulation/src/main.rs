use arrival_simulation::export::{build_export, export_json, write_to_file};
use arrival_simulation::replay::{capture_snapshot, validate_replay};
use arrival_simulation::scenarios::load::{self, LoadConfig};
use arrival_simulation::scenarios::port_call::{self, PortCallConfig};
use arrival_simulation::workload::WorkloadConfig;
use chrono::Utc;

/// Usage: arrival-sim [seed] [operations] [report.json]
fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse()?,
        None => 42,
    };
    let operations: usize = match args.next() {
        Some(raw) => raw.parse()?,
        None => WorkloadConfig::default().operations,
    };
    let output = args.next();

    tracing::info!(seed, operations, "Starting arrival registry simulation");

    let base_time = Utc::now().timestamp_millis();
    let mut scenarios = port_call::run_all(&PortCallConfig {
        base_time,
        ..PortCallConfig::default()
    });

    let load_config = LoadConfig {
        base_time,
        workload: WorkloadConfig {
            seed,
            operations,
            ..WorkloadConfig::default()
        },
        ..LoadConfig::default()
    };
    let (load_result, metrics, registry) = load::run(&load_config);
    scenarios.push(load_result);

    let snapshot = capture_snapshot(&registry);
    let replay = validate_replay(&load_config.owner, registry.notifications(), &snapshot);

    let export = build_export(seed, scenarios, metrics, snapshot, replay);
    match output {
        Some(path) => {
            write_to_file(&export, &path)?;
            tracing::info!(path = %path, "Report written");
        }
        None => println!("{}", export_json(&export)),
    }

    if !export.passed() {
        anyhow::bail!("simulation failed");
    }
    Ok(())
}
