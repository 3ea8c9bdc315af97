//! Web server configuration
//!
//! Binding, static file serving, CORS and request body limits for the
//! HTTP server that hosts the session endpoint.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Directory of pre-built page assets served as a fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,
    /// Origins allowed to call the API cross-origin
    pub allowed_origins: Vec<String>,
    /// Request bodies above this size are treated as absent
    pub max_body_bytes: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            max_body_bytes: 64 * 1024,
        }
    }
}

impl WebConfig {
    /// `host:port` as a single string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
