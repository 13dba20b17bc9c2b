//! Arrival record types
//!
//! An arrival record is the current declared state of one port call.
//! Writes always replace the whole record, so the writable fields travel
//! together as [`ArrivalDetails`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::VoyageNoticeId;

/// Arrival status drawn from an open vocabulary.
///
/// Upstream systems use values such as `"EN_ATTENTE"` or `"ARRIVE"`; the
/// registry stores whatever it is given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrivalStatus(String);

impl ArrivalStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArrivalStatus {
    fn from(status: &str) -> Self {
        Self(status.to_string())
    }
}

impl From<String> for ArrivalStatus {
    fn from(status: String) -> Self {
        Self(status)
    }
}

impl fmt::Display for ArrivalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Writable fields of an arrival declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalDetails {
    /// Voyage / ship-call reference, key of the ship index
    pub call_reference: String,
    pub port_name: String,
    /// Port code, key of the port index
    pub port_code: String,
    pub vessel_name: String,
    pub status: ArrivalStatus,
}

impl ArrivalDetails {
    pub fn new(
        call_reference: impl Into<String>,
        port_name: impl Into<String>,
        port_code: impl Into<String>,
        vessel_name: impl Into<String>,
        status: impl Into<ArrivalStatus>,
    ) -> Self {
        Self {
            call_reference: call_reference.into(),
            port_name: port_name.into(),
            port_code: port_code.into(),
            vessel_name: vessel_name.into(),
            status: status.into(),
        }
    }
}

/// Current state of one voyage notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    pub voyage_notice_id: VoyageNoticeId,
    pub call_reference: String,
    pub port_name: String,
    pub port_code: String,
    pub vessel_name: String,
    pub status: ArrivalStatus,
    /// Commit timestamp (unix millis)
    pub recorded_at: i64,
}

impl ArrivalRecord {
    /// Build a record from a declaration, stamped with the commit time.
    pub fn from_details(
        voyage_notice_id: VoyageNoticeId,
        details: ArrivalDetails,
        recorded_at: i64,
    ) -> Self {
        Self {
            voyage_notice_id,
            call_reference: details.call_reference,
            port_name: details.port_name,
            port_code: details.port_code,
            vessel_name: details.vessel_name,
            status: details.status,
            recorded_at,
        }
    }

    /// The writable fields of this record.
    pub fn details(&self) -> ArrivalDetails {
        ArrivalDetails {
            call_reference: self.call_reference.clone(),
            port_name: self.port_name.clone(),
            port_code: self.port_code.clone(),
            vessel_name: self.vessel_name.clone(),
            status: self.status.clone(),
        }
    }
}
