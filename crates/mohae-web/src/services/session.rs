//! Session issuing
//!
//! Turns an anonymous browser request into a ChatKit session for the
//! configured workflow. Request bodies are read leniently: anything that is
//! not a JSON object behaves exactly like no body at all.

use crate::services::chatkit::{CreateSessionParams, SessionBackend, UpstreamError, WorkflowParams};
use mohae_config::SessionConfig;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Tag identifying this client surface to the workflow
pub const ENTRYPOINT: &str = "family-planner-web";

/// Prefix for generated user ids
pub const USER_PREFIX: &str = "family-planner";

/// Caller-supplied session parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRequest {
    pub user: Option<String>,
    pub state_variables: Option<Map<String, Value>>,
}

impl SessionRequest {
    /// Parse a raw body. Empty, unreadable or non-object bodies yield the
    /// default request.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::debug!("Ignoring unparseable session request body: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            user: value.get("user").and_then(Value::as_str).map(str::to_string),
            state_variables: value
                .get("state_variables")
                .and_then(Value::as_object)
                .cloned(),
        }
    }
}

/// What the browser receives
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionToken {
    pub client_secret: String,
    pub expires_at: i64,
    pub session_id: String,
}

/// Keep only string, number and boolean values.
///
/// `None` in means `None` out; an empty map stays an empty map.
pub fn sanitize_state_variables(input: Option<&Map<String, Value>>) -> Option<Map<String, Value>> {
    let input = input?;
    Some(
        input
            .iter()
            .filter(|(_, value)| value.is_string() || value.is_number() || value.is_boolean())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    )
}

/// Sanitized variables with the entrypoint tag applied last, so a caller
/// cannot override it.
pub fn workflow_state_variables(input: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut variables = sanitize_state_variables(input).unwrap_or_default();
    variables.insert("entrypoint".to_string(), Value::String(ENTRYPOINT.to_string()));
    variables
}

/// Fresh user id for callers that did not supply one
pub fn fallback_user() -> String {
    format!("{}-{}", USER_PREFIX, Uuid::new_v4())
}

/// Build the upstream parameters for `request`
pub fn session_params(config: &SessionConfig, request: &SessionRequest) -> CreateSessionParams {
    CreateSessionParams {
        user: request.user.clone().unwrap_or_else(fallback_user),
        workflow: WorkflowParams {
            id: config.workflow_id.clone(),
            state_variables: workflow_state_variables(request.state_variables.as_ref()),
        },
    }
}

/// Create a session and reduce it to the three fields the browser needs.
///
/// Upstream failures are logged here with full detail; callers only ever
/// see the typed error.
pub async fn issue_session(
    backend: &dyn SessionBackend,
    config: &SessionConfig,
    request: &SessionRequest,
) -> Result<SessionToken, UpstreamError> {
    let params = session_params(config, request);

    match backend.create_session(&config.api_key, &params).await {
        Ok(session) => {
            tracing::debug!(session_id = %session.id, "Created ChatKit session");
            Ok(SessionToken {
                client_secret: session.client_secret,
                expires_at: session.expires_at,
                session_id: session.id,
            })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create ChatKit session");
            Err(e)
        }
    }
}
