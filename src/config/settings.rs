//! Configuration settings for feltmap.

use crate::api::StagingMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV_VAR: &str = "FELT_API_TOKEN";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// Layer upload configuration.
    pub layer: LayerConfig,
    /// Iframe rendering configuration.
    pub embed: EmbedConfig,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(super::config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(super::config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Felt API base URL.
    pub base_url: String,
    /// Bearer token (optional, falls back to `FELT_API_TOKEN`).
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Resolve the API token from config, then from the environment.
    pub fn resolve_token(&self) -> crate::Result<String> {
        self.resolve_token_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API token, reading the environment through `lookup`.
    ///
    /// A blank configured token counts as unset.
    pub fn resolve_token_with<F>(&self, lookup: F) -> crate::Result<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| lookup(TOKEN_ENV_VAR))
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                crate::Error::auth(format!(
                    "No API token configured; set api.token or {}",
                    TOKEN_ENV_VAR
                ))
            })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://felt.com/api/v1/".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

/// Layer upload configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// File name announced to Felt and used for the uploaded part.
    pub file_name: String,
    /// Display name of the new layer.
    pub layer_name: String,
    /// Prepend a row-index column to the CSV.
    pub include_index: bool,
    /// Where the CSV payload is staged before upload.
    pub staging: StagingMode,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            file_name: "dataframe.csv".to_string(),
            layer_name: "DataFrame".to_string(),
            include_index: false,
            staging: StagingMode::Memory,
        }
    }
}

/// Iframe rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Iframe width.
    pub width: String,
    /// Iframe height.
    pub height: String,
    /// Inline CSS.
    pub style: String,
    /// Accessible title.
    pub title: String,
    /// Referrer policy attribute.
    pub referrer_policy: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            width: "99%".to_string(),
            height: "450px".to_string(),
            style: "border: 1px solid #415125; border-radius: 8px".to_string(),
            title: "Felt Map".to_string(),
            referrer_policy: "strict-origin-when-cross-origin".to_string(),
        }
    }
}
