//! Inbound arrival notices
//!
//! Arrival declarations reach the registry as JSON messages published by the
//! ship management service. Every text field is mandatory; the arrival time
//! is informative only and never replaces the commit timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::arrival::{ArrivalDetails, ArrivalStatus};
use crate::errors::NoticeError;
use crate::ids::VoyageNoticeId;

/// One arrival declaration as published on the message bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalNotice {
    /// Message identifier, stable across redeliveries
    pub message_id: Uuid,
    pub voyage_notice_id: VoyageNoticeId,
    pub call_reference: String,
    pub port_name: String,
    pub port_code: String,
    pub vessel_name: String,
    pub status: ArrivalStatus,
    /// Actual arrival time, when the ship has already berthed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<DateTime<Utc>>,
}

impl ArrivalNotice {
    /// Build a notice with a fresh message id.
    pub fn new(voyage_notice_id: VoyageNoticeId, details: ArrivalDetails) -> Self {
        Self {
            message_id: Uuid::now_v7(),
            voyage_notice_id,
            call_reference: details.call_reference,
            port_name: details.port_name,
            port_code: details.port_code,
            vessel_name: details.vessel_name,
            status: details.status,
            arrival_time: None,
        }
    }

    /// Parse a notice from a raw message body.
    pub fn from_json(payload: &str) -> Result<Self, NoticeError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Reject notices with empty or whitespace-only text fields.
    pub fn validate(&self) -> Result<(), NoticeError> {
        let fields = [
            ("callReference", self.call_reference.as_str()),
            ("portName", self.port_name.as_str()),
            ("portCode", self.port_code.as_str()),
            ("vesselName", self.vessel_name.as_str()),
            ("status", self.status.as_str()),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(NoticeError::BlankField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Writable registry fields carried by this notice.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArrivalNotice {
        ArrivalNotice::new(
            VoyageNoticeId::new(12345),
            ArrivalDetails::new("ESC001", "Casablanca", "CASA", "Test Ship", "EN_ATTENTE"),
        )
    }

    #[test]
    fn test_valid_notice() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn test_blank_port_code_rejected() {
        let mut notice = sample();
        notice.port_code = "   ".to_string();
        assert_eq!(
            notice.validate(),
            Err(NoticeError::BlankField {
                field: "portCode".to_string()
            })
        );
    }

    #[test]
    fn test_empty_status_rejected() {
        let mut notice = sample();
        notice.status = ArrivalStatus::new("");
        assert!(matches!(
            notice.validate(),
            Err(NoticeError::BlankField { field }) if field == "status"
        ));
    }

    #[test]
    fn test_parse_camel_case_payload() {
        let payload = r#"{
            "messageId": "0190b6d2-7c3e-7a10-8000-000000000001",
            "voyageNoticeId": 12345,
            "callReference": "ESC001",
            "portName": "Casablanca",
            "portCode": "CASA",
            "vesselName": "Test Ship",
            "status": "EN_ATTENTE",
            "arrivalTime": "2025-03-01T08:30:00Z"
        }"#;
        let notice = ArrivalNotice::from_json(payload).unwrap();
        assert_eq!(notice.voyage_notice_id.value(), 12345);
        assert_eq!(notice.port_code, "CASA");
        assert!(notice.arrival_time.is_some());
    }

    #[test]
    fn test_arrival_time_is_optional() {
        let payload = r#"{
            "messageId": "0190b6d2-7c3e-7a10-8000-000000000002",
            "voyageNoticeId": 1,
            "callReference": "ESC002",
            "portName": "Tanger",
            "portCode": "TNG",
            "vesselName": "Another Ship",
            "status": "ARRIVE"
        }"#;
        let notice = ArrivalNotice::from_json(payload).unwrap();
        assert_eq!(notice.arrival_time, None);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let payload = r#"{"messageId": "0190b6d2-7c3e-7a10-8000-000000000003", "voyageNoticeId": 1}"#;
        assert!(matches!(
            ArrivalNotice::from_json(payload),
            Err(NoticeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_details_carry_notice_fields() {
        let notice = sample();
        let details = notice.details();
        assert_eq!(details.call_reference, "ESC001");
        assert_eq!(details.vessel_name, "Test Ship");
    }
}
