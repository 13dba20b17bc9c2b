//! Scenario & Workload Testing Framework
//!
//! Drives the arrival registry the way its external callers do and checks
//! the results. All runs are deterministic for a given seed.
//!
//! # Modules
//! - `workload` — Seeded generator of registry calls
//! - `scenarios` — Port-call acceptance scenarios and the load scenario
//! - `invariants` — Full registry consistency checker
//! - `metrics` — Call outcome counters
//! - `replay` — Notification export and deterministic replay validation
//! - `export` — Report JSON export

pub mod workload;
pub mod scenarios;
pub mod invariants;
pub mod metrics;
pub mod replay;
pub mod export;

/// Crate version constant
pub const VERSION: &str = "1.0.0";
