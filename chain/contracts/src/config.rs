//! Registry configuration
//!
//! Loaded from a JSON document or from `ARRIVAL_REGISTRY_*` environment
//! variables. Only the owner is mandatory.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const ENV_OWNER: &str = "ARRIVAL_REGISTRY_OWNER";
pub const ENV_MAX_EVENTS: &str = "ARRIVAL_REGISTRY_MAX_EVENTS";
pub const ENV_DEDUP_WINDOW: &str = "ARRIVAL_REGISTRY_DEDUP_WINDOW";

/// Default notice redelivery window.
pub const DEFAULT_DEDUP_WINDOW: usize = 10_000;

/// Largest accepted redelivery window.
pub const MAX_DEDUP_WINDOW: usize = 1_000_000;

/// Configuration for an arrival registry deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Identity allowed to write; fixed for the registry's lifetime.
    pub owner: String,
    /// Size of the event identifier space (default: `u64::MAX`).
    #[serde(default = "default_max_events")]
    pub max_events: u64,
    /// Number of recent notice message ids remembered for deduplication.
    #[serde(default = "default_dedup_window")]
    pub dedup_window: usize,
}

fn default_max_events() -> u64 {
    u64::MAX
}

fn default_dedup_window() -> usize {
    DEFAULT_DEDUP_WINDOW
}

impl RegistryConfig {
    /// Create a config with defaults for everything but the owner.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            max_events: default_max_events(),
            dedup_window: default_dedup_window(),
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner = lookup(ENV_OWNER).ok_or_else(|| ConfigError::Missing {
            key: ENV_OWNER.to_string(),
        })?;
        let mut config = Self::new(owner);

        if let Some(raw) = lookup(ENV_MAX_EVENTS) {
            config.max_events = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_MAX_EVENTS.to_string(),
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup(ENV_DEDUP_WINDOW) {
            config.dedup_window = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_DEDUP_WINDOW.to_string(),
                value: raw.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject a blank owner, an empty identifier space or an oversized
    /// redelivery window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "owner".to_string(),
                value: self.owner.clone(),
            });
        }
        if self.max_events == 0 {
            return Err(ConfigError::Invalid {
                key: "max_events".to_string(),
                value: "0".to_string(),
            });
        }
        if self.dedup_window > MAX_DEDUP_WINDOW {
            return Err(ConfigError::Invalid {
                key: "dedup_window".to_string(),
                value: self.dedup_window.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = RegistryConfig::new("0xowner");
        assert_eq!(config.max_events, u64::MAX);
        assert_eq!(config.dedup_window, DEFAULT_DEDUP_WINDOW);
    }

    #[test]
    fn test_from_json_with_defaults() {
        let config = RegistryConfig::from_json(r#"{"owner": "0xowner"}"#).unwrap();
        assert_eq!(config, RegistryConfig::new("0xowner"));
    }

    #[test]
    fn test_from_json_full() {
        let config = RegistryConfig::from_json(
            r#"{"owner": "0xowner", "max_events": 500, "dedup_window": 16}"#,
        )
        .unwrap();
        assert_eq!(config.max_events, 500);
        assert_eq!(config.dedup_window, 16);
    }

    #[test]
    fn test_from_json_missing_owner() {
        let result = RegistryConfig::from_json(r#"{"max_events": 5}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_lookup() {
        let config = RegistryConfig::from_lookup(lookup_from(&[
            (ENV_OWNER, "0xowner"),
            (ENV_MAX_EVENTS, " 1000 "),
        ]))
        .unwrap();
        assert_eq!(config.owner, "0xowner");
        assert_eq!(config.max_events, 1000);
        assert_eq!(config.dedup_window, DEFAULT_DEDUP_WINDOW);
    }

    #[test]
    fn test_from_lookup_missing_owner() {
        let result = RegistryConfig::from_lookup(lookup_from(&[]));
        assert_eq!(
            result,
            Err(ConfigError::Missing {
                key: ENV_OWNER.to_string()
            })
        );
    }

    #[test]
    fn test_from_lookup_invalid_number() {
        let result = RegistryConfig::from_lookup(lookup_from(&[
            (ENV_OWNER, "0xowner"),
            (ENV_DEDUP_WINDOW, "lots"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { key, .. }) if key == ENV_DEDUP_WINDOW));
    }

    #[test]
    fn test_blank_owner_rejected() {
        assert!(RegistryConfig::new("  ").validate().is_err());
    }

    #[test]
    fn test_zero_max_events_rejected() {
        let mut config = RegistryConfig::new("0xowner");
        config.max_events = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_dedup_window_rejected() {
        let max = usize::MAX.to_string();
        let result = RegistryConfig::from_lookup(lookup_from(&[
            (ENV_OWNER, "0xowner"),
            (ENV_DEDUP_WINDOW, max.as_str()),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { key, .. }) if key == "dedup_window"));

        let mut config = RegistryConfig::new("0xowner");
        config.dedup_window = MAX_DEDUP_WINDOW;
        assert!(config.validate().is_ok());
        config.dedup_window = MAX_DEDUP_WINDOW + 1;
        assert!(config.validate().is_err());
    }
}
