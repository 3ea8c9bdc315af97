//! Static page assets
//!
//! The page itself is built elsewhere; when a directory is configured its
//! files are served for any path the API does not claim.

use axum::Router;
use tower_http::services::ServeDir;

pub fn static_routes(web_dir: Option<&str>) -> Router {
    match web_dir {
        Some(dir) => {
            tracing::info!("Serving static assets from: {}", dir);
            Router::new().fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        }
        None => Router::new(),
    }
}
