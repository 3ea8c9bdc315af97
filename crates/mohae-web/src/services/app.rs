use crate::services::chatkit::{ChatKitClient, SessionBackend};
use crate::{Result, WebError};
use mohae_config::{AppConfig, ChatKitConfig};
use std::sync::Arc;

/// State shared by every request. Nothing in it changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub chatkit: Arc<ChatKitConfig>,
    pub backend: Arc<dyn SessionBackend>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(config: &AppConfig, backend: Arc<dyn SessionBackend>) -> Self {
        Self {
            chatkit: Arc::new(config.chatkit.clone()),
            backend,
            max_body_bytes: config.web.max_body_bytes,
        }
    }
}

/// State backed by the real ChatKit API.
///
/// Missing credentials are not an error here; they surface per request.
pub fn init_state(config: &AppConfig) -> Result<AppState> {
    let client = ChatKitClient::new(&config.chatkit).map_err(WebError::HttpClient)?;

    if let Err(e) = config.chatkit.require() {
        tracing::warn!("{}; session requests will fail until it is set", e);
    }

    Ok(AppState::new(config, Arc::new(client)))
}
