//! Owner-only access control
//!
//! The registry has exactly one writer: whoever deployed it. Ownership
//! cannot be transferred or revoked.

use crate::errors::RegistryError;

/// Fixed-owner access control.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: String,
}

impl AccessControl {
    /// Create access control owned by `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }

    /// Check if a caller is the owner.
    pub fn is_owner(&self, caller: &str) -> bool {
        self.owner == caller
    }

    /// Reject any caller other than the owner.
    pub fn authorize(&self, caller: &str) -> Result<(), RegistryError> {
        if !self.is_owner(caller) {
            return Err(RegistryError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        Ok(())
    }

    /// Get the owner identifier.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}
