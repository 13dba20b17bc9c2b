//! Types library for the port-call arrival registry
//!
//! This library provides the domain types shared by the registry contract
//! and its callers.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: Identifiers (VoyageNoticeId, EventId)
//! - `arrival`: Arrival records, writable details, open status vocabulary
//! - `notice`: Inbound arrival notices from the message bus
//! - `errors`: Notice validation errors

pub mod ids;
pub mod arrival;
pub mod notice;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::arrival::*;
    pub use crate::notice::*;
    pub use crate::errors::*;
}
