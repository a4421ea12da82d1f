use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::config::TrackerConfig;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = "taskdeck.toml";

/// Error type for config loading
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

/// Read and parse one config file. Missing tables and keys take defaults.
pub fn read_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the session config.
///
/// An explicit path must exist. Otherwise `taskdeck.toml` in `dir` is used
/// when present, and built-in defaults when not.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<TrackerConfig, ConfigError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return read_config(path);
    }
    let path = dir.join(CONFIG_FILE);
    if path.is_file() {
        debug!(path = %path.display(), "loading config");
        read_config(&path)
    } else {
        Ok(TrackerConfig::default())
    }
}
