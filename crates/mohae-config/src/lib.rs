//! # Woori Mohae Configuration
//!
//! Configuration for the ChatKit session bridge: server binding, the
//! upstream ChatKit credentials, and how they are resolved from a TOML file
//! and the process environment.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mohae_config::AppConfig;
//!
//! let config = AppConfig::load(None).expect("config");
//! println!("binding {}:{}", config.web.host, config.web.port);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod components;
mod credentials;
mod loader;

pub use components::*;
pub use credentials::{resolve_env, CredentialSource, EnvLookup};
pub use loader::{AppConfig, ConfigError, ConfigResult};
