//! ChatKit session API client
//!
//! The only outbound call the server makes: create a session for the
//! configured workflow and hand back its client secret.

use async_trait::async_trait;
use mohae_config::ChatKitConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Beta opt-in required by the ChatKit endpoints
const BETA_HEADER: &str = "openai-beta";
const BETA_VALUE: &str = "chatkit_beta=v1";

/// Body of the session-creation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSessionParams {
    pub user: String,
    pub workflow: WorkflowParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowParams {
    pub id: String,
    pub state_variables: Map<String, Value>,
}

/// Session as returned by the API; fields the bridge does not use are
/// dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatKitSession {
    pub id: String,
    pub client_secret: String,
    pub expires_at: i64,
}

/// Errors from the session-creation call
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("ChatKit request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ChatKit returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("ChatKit returned an unreadable session: {0}")]
    Decode(String),
}

/// Creates ChatKit sessions
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn create_session(
        &self,
        api_key: &str,
        params: &CreateSessionParams,
    ) -> Result<ChatKitSession, UpstreamError>;
}

/// [`SessionBackend`] backed by the ChatKit HTTP API
#[derive(Debug, Clone)]
pub struct ChatKitClient {
    http: reqwest::Client,
    api_base: String,
}

impl ChatKitClient {
    pub fn new(config: &ChatKitConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(BETA_HEADER),
            HeaderValue::from_static(BETA_VALUE),
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn sessions_url(&self) -> String {
        format!("{}/chatkit/sessions", self.api_base)
    }
}

#[async_trait]
impl SessionBackend for ChatKitClient {
    async fn create_session(
        &self,
        api_key: &str,
        params: &CreateSessionParams,
    ) -> Result<ChatKitSession, UpstreamError> {
        let response = self
            .http
            .post(self.sessions_url())
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .json(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}
