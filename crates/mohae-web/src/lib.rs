pub mod headers;
pub mod routes;
pub mod server;
pub mod services;

mod assets;
mod error;

pub use error::{Result, WebError, SESSION_FAILURE_MESSAGE};
pub use mohae_config::{AppConfig, WebConfig};
pub use server::{router, serve, start_server};
pub use services::{AppState, SessionBackend};
