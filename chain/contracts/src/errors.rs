//! Contract-specific error types
//!
//! Error taxonomy for registry mutations, notice processing and configuration.

use arrival_types::errors::NoticeError;
use arrival_types::ids::VoyageNoticeId;
use thiserror::Error;

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unauthorized: caller {caller} is not the owner")]
    Unauthorized { caller: String },

    #[error("Arrival not found: {voyage_notice_id}")]
    NotFound { voyage_notice_id: VoyageNoticeId },

    /// Identifier space exhausted. No recovery path exists.
    #[error("Event identifier space exhausted at {limit} events")]
    EventIdExhausted { limit: u64 },
}

/// Notice processing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessorError {
    #[error("Invalid notice: {0}")]
    Notice(#[from] NoticeError),

    #[error("Registry rejected notice: {0}")]
    Registry(#[from] RegistryError),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Missing configuration key: {key}")]
    Missing { key: String },

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },

    #[error("Configuration parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        let err = RegistryError::Unauthorized {
            caller: "0xuser".to_string(),
        };
        assert_eq!(err.to_string(), "Unauthorized: caller 0xuser is not the owner");
    }

    #[test]
    fn test_not_found_display() {
        let err = RegistryError::NotFound {
            voyage_notice_id: VoyageNoticeId::new(99999),
        };
        assert!(err.to_string().contains("99999"));
    }

    #[test]
    fn test_processor_error_from_registry() {
        let registry_err = RegistryError::NotFound {
            voyage_notice_id: VoyageNoticeId::new(1),
        };
        let err: ProcessorError = registry_err.into();
        assert!(matches!(err, ProcessorError::Registry(_)));
    }

    #[test]
    fn test_processor_error_from_notice() {
        let notice_err = NoticeError::BlankField {
            field: "portCode".to_string(),
        };
        let err: ProcessorError = notice_err.into();
        assert!(matches!(err, ProcessorError::Notice(_)));
    }
}
