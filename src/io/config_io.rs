use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::ClientConfig;

/// Error type for reading config.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read config.toml from a specific path. A missing file yields the defaults;
/// a malformed one is an error rather than a silent fallback.
pub fn read_config_from(path: &Path) -> Result<ClientConfig, ConfigError> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read config.toml from the default location
pub fn read_config() -> Result<ClientConfig, ConfigError> {
    read_config_from(&super::paths::config_path())
}
