//! ChatKit upstream configuration
//!
//! Both the API key and the workflow id are required to mint sessions, but
//! neither is required to start the server: a deployment missing either one
//! answers every session request with a configuration error instead.

use crate::loader::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the server-side API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable holding the workflow id
pub const WORKFLOW_ID_ENV: &str = "CHATKIT_WORKFLOW_ID";
/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "CHATKIT_API_BASE";

/// Default ChatKit API base URL
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// ChatKit section of the configuration file
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatKitConfig {
    /// Server-held API key, never sent to browsers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Agent workflow to start sessions against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    /// Base URL of the ChatKit API
    pub api_base: String,
    /// Timeout for the session-creation call
    pub timeout_secs: u64,
}

impl Default for ChatKitConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            workflow_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for ChatKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatKitConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("workflow_id", &self.workflow_id)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ChatKitConfig {
    /// Check both required values are present.
    ///
    /// The API key is checked first. Empty strings count as missing.
    pub fn require(&self) -> ConfigResult<SessionConfig> {
        let api_key = non_empty(self.api_key.as_deref()).ok_or(ConfigError::MissingApiKey)?;
        let workflow_id =
            non_empty(self.workflow_id.as_deref()).ok_or(ConfigError::MissingWorkflowId)?;

        Ok(SessionConfig {
            api_key: api_key.to_string(),
            workflow_id: workflow_id.to_string(),
        })
    }

    /// Upstream request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Validated per-deployment session configuration
#[derive(Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Server-held API key
    pub api_key: String,
    /// Workflow id sessions are created for
    pub workflow_id: String,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("api_key", &"<redacted>")
            .field("workflow_id", &self.workflow_id)
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
