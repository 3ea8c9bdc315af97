mod health;
mod options;
mod session;

pub use health::health_routes;
pub use options::options_routes;
pub use session::session_routes;
