//! Error types for inbound data
//!
//! Registry-level failures live with the contract; this module only covers
//! what can be wrong with a notice before it reaches the registry.

use thiserror::Error;

/// Arrival notice validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoticeError {
    #[error("Required field is blank: {field}")]
    BlankField { field: String },

    #[error("Malformed notice: {reason}")]
    Malformed { reason: String },
}

impl From<serde_json::Error> for NoticeError {
    fn from(err: serde_json::Error) -> Self {
        NoticeError::Malformed {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_field_display() {
        let err = NoticeError::BlankField {
            field: "portCode".to_string(),
        };
        assert_eq!(err.to_string(), "Required field is blank: portCode");
    }

    #[test]
    fn test_malformed_from_json_error() {
        let json_err = serde_json::from_str::<u64>("not a number").unwrap_err();
        let err: NoticeError = json_err.into();
        assert!(matches!(err, NoticeError::Malformed { .. }));
    }
}
