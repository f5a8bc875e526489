//! Engine configuration loaded from TOML.
//!
//! ```toml
//! max_turns = 60
//! first = "orange"
//!
//! [search]
//! depth = 5
//! ```

use std::path::{Path, PathBuf};

use nhac_core::Player;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::search::{SearchConfig, MAX_DEPTH};

/// Errors while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("search depth {depth} out of range (must be 1-{max})")]
    InvalidDepth { depth: u8, max: u8 },

    #[error("max_turns must be at least 1")]
    NoTurns,
}

/// Settings for the self-play harness and the searcher it drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    /// Plies played before a self-play game is called a draw.
    pub max_turns: u32,
    /// Player to move first.
    pub first: Player,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            max_turns: 60,
            first: Player::Orange,
        }
    }
}

impl EngineConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(depth = config.search.depth, max_turns = config.max_turns, "config loaded");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let depth = self.search.depth;
        if depth == 0 || depth > MAX_DEPTH {
            return Err(ConfigError::InvalidDepth {
                depth,
                max: MAX_DEPTH,
            });
        }
        if self.max_turns == 0 {
            return Err(ConfigError::NoTurns);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DEFAULT_DEPTH;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search.depth, DEFAULT_DEPTH);
        assert_eq!(config.first, Player::Orange);
    }

    #[test]
    fn test_full_config() {
        let config = EngineConfig::from_toml_str(
            r#"
            max_turns = 12
            first = "blue"

            [search]
            depth = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.max_turns, 12);
        assert_eq!(config.first, Player::Blue);
        assert_eq!(config.search.depth, 3);
    }

    #[test]
    fn test_rejects_bad_depth() {
        let err = EngineConfig::from_toml_str("[search]\ndepth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDepth { depth: 0, .. }));

        let err = EngineConfig::from_toml_str("[search]\ndepth = 12\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDepth { depth: 12, .. }));
    }

    #[test]
    fn test_rejects_zero_turns() {
        let err = EngineConfig::from_toml_str("max_turns = 0").unwrap_err();
        assert!(matches!(err, ConfigError::NoTurns));
    }

    #[test]
    fn test_parse_error() {
        let err = EngineConfig::from_toml_str("first = \"green\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/nhac.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
