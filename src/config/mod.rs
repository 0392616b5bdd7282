//! Configuration management for feltmap.

mod settings;

pub use settings::{ApiConfig, Config, EmbedConfig, LayerConfig, TOKEN_ENV_VAR};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "feltmap", "feltmap")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| Error::config("Could not determine config directory"))
}

/// Default location of the config file.
pub fn config_path() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}
