//! Session issuing endpoint

use crate::services::{issue_session, AppState, SessionRequest};
use crate::WebError;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/api/chatkit/session", post(create_session))
}

/// Exchange the server credentials for a client secret.
///
/// Configuration is checked before the body is read, so a misconfigured
/// deployment never reaches the upstream API.
async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, WebError> {
    let config = state.chatkit.require()?;
    let request = read_request(&headers, body, state.max_body_bytes).await;

    let token = issue_session(state.backend.as_ref(), &config, &request).await?;

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(token)).into_response())
}

/// Read the body without ever failing the request
async fn read_request(headers: &HeaderMap, body: Body, limit: usize) -> SessionRequest {
    let declared_empty = headers
        .get(header::CONTENT_LENGTH)
        .is_some_and(|len| len.as_bytes() == b"0");
    if declared_empty {
        return SessionRequest::default();
    }

    match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => SessionRequest::from_body(&bytes),
        Err(e) => {
            tracing::debug!("Could not read session request body: {}", e);
            SessionRequest::default()
        }
    }
}
