use anyhow::{Context, Result};
use mohae_config::AppConfig;
use std::path::PathBuf;

/// Flag values that take precedence over file and environment
#[derive(Debug, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
}

impl ServeOverrides {
    pub fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.web.host = host;
        }
        if let Some(port) = self.port {
            config.web.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.web.static_dir = Some(dir.to_string_lossy().into_owned());
        }
    }
}

/// Run the web server until interrupted
pub async fn execute(mut config: AppConfig, overrides: ServeOverrides) -> Result<()> {
    overrides.apply(&mut config);

    if let Some(dir) = &config.web.static_dir {
        if !std::path::Path::new(dir).is_dir() {
            tracing::warn!("Static directory does not exist: {}", dir);
        }
    }

    mohae_web::start_server(&config)
        .await
        .with_context(|| format!("Server on {} failed", config.web.bind_address()))
}
