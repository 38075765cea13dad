//! Engine configuration loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fen::FenOptions;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML for [`EngineConfig`].
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Engine settings.
///
/// Every field is optional in the TOML source:
///
/// ```toml
/// start_fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"
///
/// [fen]
/// track_castling = false
/// track_en_passant = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Position used at construction and by `reset_board`. Defaults to the
    /// standard starting arrangement.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Which FEN fields reflect tracked state.
    #[serde(default)]
    pub fen: FenOptions,
}

impl EngineConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
