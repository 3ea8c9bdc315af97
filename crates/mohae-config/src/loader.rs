//! Loading the application configuration
//!
//! ```toml
//! # ~/.config/woori-mohae/config.toml
//! [web]
//! port = 3000
//!
//! [chatkit]
//! workflow_id = "wf_..."
//! ```
//!
//! Secrets are better kept in the environment; `OPENAI_API_KEY`,
//! `CHATKIT_WORKFLOW_ID` and `CHATKIT_API_BASE` override the file.

use crate::components::{ChatKitConfig, WebConfig, API_BASE_ENV, API_KEY_ENV, WORKFLOW_ID_ENV};
use crate::credentials::{process_env, resolve_env, EnvLookup};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Errors from loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`AppConfig`]
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The server-side API key is absent
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    /// The workflow id is absent
    #[error("CHATKIT_WORKFLOW_ID is not configured")]
    MissingWorkflowId,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub web: WebConfig,
    /// Upstream ChatKit settings
    pub chatkit: ChatKitConfig,
}

impl AppConfig {
    /// Default config path: `$XDG_CONFIG_HOME/woori-mohae/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
            })
            .join("woori-mohae")
            .join("config.toml")
    }

    /// Load from `path` (or the default path) and apply the process
    /// environment on top.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with(path, &process_env)
    }

    /// Load using a custom environment lookup.
    ///
    /// An explicit `path` must exist. A missing default file yields defaults.
    pub fn load_with(path: Option<&Path>, lookup: EnvLookup<'_>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    debug!("No config file at {}, using defaults", default.display());
                    Self::default()
                }
            }
        };

        config.apply_env(lookup);
        Ok(config)
    }

    /// Parse a config file without environment overrides
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Overlay environment values on the file values
    pub fn apply_env(&mut self, lookup: EnvLookup<'_>) {
        let chatkit = &mut self.chatkit;

        if let Some((key, source)) = resolve_env(API_KEY_ENV, lookup, chatkit.api_key.as_deref()) {
            debug!("API key source: {}", source);
            chatkit.api_key = Some(key);
        }
        if let Some((id, _)) = resolve_env(WORKFLOW_ID_ENV, lookup, chatkit.workflow_id.as_deref())
        {
            chatkit.workflow_id = Some(id);
        }
        if let Some((base, _)) = resolve_env(API_BASE_ENV, lookup, Some(chatkit.api_base.as_str())) {
            chatkit.api_base = base;
        }
    }
}
