//! Port-Call Arrival Registry Contract
//!
//! This crate implements the contract layer that records port-of-call
//! arrival declarations: a single-owner record store with an append-only
//! event log and two secondary indices (call reference, port code).
//!
//! # Modules
//! - `errors`: Registry, processor and configuration errors
//! - `events`: Log entries and observer notifications
//! - `security`: Fixed-owner access control
//! - `store`: Current record per voyage notice id
//! - `log`: Append-only, hash-chained event log
//! - `index`: Ship and port secondary indices
//! - `registry`: Public contract façade with the atomic commit path
//! - `config`: Deployment configuration
//! - `processor`: Arrival notice intake from the message bus
//!
//! # Version
//! v0.1.0

pub mod errors;
pub mod events;
pub mod security;
pub mod store;
pub mod log;
pub mod index;
pub mod registry;
pub mod config;
pub mod processor;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
