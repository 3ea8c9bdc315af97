use crate::services::UpstreamError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mohae_config::ConfigError;
use serde_json::json;

/// Message returned for any upstream failure
pub const SESSION_FAILURE_MESSAGE: &str = "Failed to create ChatKit session";

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("upstream session call failed: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WebError>;

impl WebError {
    /// Message safe to show a browser. Upstream detail stays server-side.
    pub fn public_message(&self) -> String {
        match self {
            WebError::Config(e) => e.to_string(),
            WebError::Upstream(_) => SESSION_FAILURE_MESSAGE.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_name_the_missing_value() {
        let err = WebError::from(ConfigError::MissingWorkflowId);
        assert_eq!(err.public_message(), "CHATKIT_WORKFLOW_ID is not configured");
    }

    #[test]
    fn upstream_detail_is_hidden() {
        let err = WebError::from(UpstreamError::Status {
            status: 401,
            body: "invalid api key sk-live-123".to_string(),
        });
        assert_eq!(err.public_message(), SESSION_FAILURE_MESSAGE);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
