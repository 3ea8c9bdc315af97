use crate::assets::static_routes;
use crate::headers::with_security_headers;
use crate::routes::{health_routes, options_routes, session_routes};
use crate::services::{init_state, AppState};
use crate::{Result, WebError};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use mohae_config::{AppConfig, WebConfig};
use std::future::Future;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the application router
pub fn router(state: AppState, web: &WebConfig) -> Router {
    let app = Router::new()
        .merge(session_routes())
        .with_state(state)
        .merge(options_routes())
        .merge(health_routes())
        .merge(static_routes(web.static_dir.as_deref()))
        .layer(cors_layer(&web.allowed_origins));

    with_security_headers(app)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Run the server until Ctrl-C
pub async fn start_server(config: &AppConfig) -> Result<()> {
    let state = init_state(config)?;
    serve(config, state, shutdown_signal()).await
}

/// Run the server until `shutdown` resolves
pub async fn serve<F>(config: &AppConfig, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state, &config.web);

    let addr: SocketAddr = config
        .web
        .bind_address()
        .parse()
        .map_err(|e| WebError::InvalidAddress(format!("{}: {e}", config.web.bind_address())))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting web server on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
