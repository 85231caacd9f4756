//! Machine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading or checking a [`MachineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_depth must be at least 2 (a state and the root), got {max_depth}")]
    MaxDepthTooSmall { max_depth: usize },
}

/// Tunables for one machine instance.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use statetree::builder::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "cache_paths": true }"#).unwrap();
/// assert!(config.cache_paths);
/// assert_eq!(config.max_depth, MachineConfig::DEFAULT_MAX_DEPTH);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Longest ancestor chain (state through root, inclusive) any walk may
    /// build before the depth guard fires.
    pub max_depth: usize,

    /// Record completed transitions in the machine's history.
    pub record_history: bool,

    /// Records kept before the oldest is evicted.
    pub history_limit: usize,

    /// Memoize resolved paths per (source, destination) pair.
    pub cache_paths: bool,
}

impl MachineConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 10;
    pub const DEFAULT_HISTORY_LIMIT: usize = 256;

    /// Parse and check a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth < 2 {
            return Err(ConfigError::MaxDepthTooSmall {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            record_history: true,
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
            cache_paths: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = MachineConfig::default();
        assert_eq!(config.max_depth, 10);
        assert!(config.record_history);
        assert_eq!(config.history_limit, 256);
        assert!(!config.cache_paths);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn json_overrides_fields() {
        let config =
            MachineConfig::from_json(r#"{ "max_depth": 4, "record_history": false }"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert!(!config.record_history);
        assert_eq!(config.history_limit, 256);
    }

    #[test]
    fn rejects_tiny_max_depth() {
        let result = MachineConfig::from_json(r#"{ "max_depth": 1 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::MaxDepthTooSmall { max_depth: 1 })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let result = MachineConfig::from_json("{ max_depth: }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
