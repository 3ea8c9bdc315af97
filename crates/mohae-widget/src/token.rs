//! Client secret fetching
//!
//! The widget asks for a client secret whenever it starts or refreshes a
//! session. [`HttpClientSecretSource`] answers by calling the session
//! endpoint served by `mohae-web`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Path of the session endpoint relative to the page origin
pub const SESSION_ENDPOINT_PATH: &str = "/api/chatkit/session";

/// Rejection message when the endpoint gives no usable body
pub const TOKEN_FETCH_FALLBACK_MESSAGE: &str = "Unable to initialize chat session.";

/// Errors from fetching a client secret
#[derive(Debug, thiserror::Error)]
pub enum TokenFetchError {
    /// The endpoint answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The endpoint could not be reached
    #[error("failed to reach session endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered 2xx without a client secret
    #[error("session endpoint returned an invalid payload: {0}")]
    InvalidPayload(String),
}

/// Something that can mint client secrets for the widget
#[async_trait]
pub trait ClientSecretSource: Send + Sync {
    /// Fetch a secret, forwarding the one currently held (if any) so the
    /// server can continue the session.
    async fn client_secret(&self, current: Option<&str>) -> Result<String, TokenFetchError>;
}

/// [`ClientSecretSource`] that POSTs to the session endpoint
#[derive(Debug, Clone)]
pub struct HttpClientSecretSource {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SecretPayload {
    client_secret: String,
}

impl HttpClientSecretSource {
    /// Source for the session endpoint under `origin`
    /// (e.g. `http://localhost:3000`)
    pub fn for_origin(origin: &str) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            format!("{}{}", origin.trim_end_matches('/'), SESSION_ENDPOINT_PATH),
        )
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ClientSecretSource for HttpClientSecretSource {
    async fn client_secret(&self, current: Option<&str>) -> Result<String, TokenFetchError> {
        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&json!({ "currentClientSecret": current }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TokenFetchError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let payload: SecretPayload = serde_json::from_str(&body)
            .map_err(|e| TokenFetchError::InvalidPayload(e.to_string()))?;
        Ok(payload.client_secret)
    }
}

/// Message for a failed response: the `error` field of a JSON body, else the
/// raw body, else the fallback.
fn rejection_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        TOKEN_FETCH_FALLBACK_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source_for(server: &MockServer) -> HttpClientSecretSource {
        HttpClientSecretSource::for_origin(&server.uri())
    }

    #[tokio::test]
    async fn returns_client_secret_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chatkit/session"))
            .and(body_json(json!({ "currentClientSecret": null })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "client_secret": "sk_abc",
                "expires_at": 1700000000,
                "session_id": "sess_1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let secret = source_for(&server).client_secret(None).await.unwrap();
        assert_eq!(secret, "sk_abc");
    }

    #[tokio::test]
    async fn forwards_current_secret() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "currentClientSecret": "sk_old" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "client_secret": "sk_new" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let secret = source_for(&server)
            .client_secret(Some("sk_old"))
            .await
            .unwrap();
        assert_eq!(secret, "sk_new");
    }

    #[tokio::test]
    async fn rejection_uses_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": "Failed to create ChatKit session"
            })))
            .mount(&server)
            .await;

        let err = source_for(&server).client_secret(None).await.unwrap_err();
        match err {
            TokenFetchError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to create ChatKit session");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_rejection_body_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = source_for(&server).client_secret(None).await.unwrap_err();
        assert_eq!(err.to_string(), TOKEN_FETCH_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn missing_secret_is_invalid_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let err = source_for(&server).client_secret(None).await.unwrap_err();
        assert!(matches!(err, TokenFetchError::InvalidPayload(_)));
    }

    #[test]
    fn plain_text_rejection_is_passed_through() {
        assert_eq!(rejection_message("  upstream down \n"), "upstream down");
        assert_eq!(rejection_message(""), TOKEN_FETCH_FALLBACK_MESSAGE);
        assert_eq!(rejection_message(r#"{"error":""}"#), r#"{"error":""}"#);
    }
}
