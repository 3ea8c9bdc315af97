pub mod app;
pub mod chatkit;
pub mod session;

pub use app::{init_state, AppState};
pub use chatkit::{ChatKitClient, ChatKitSession, CreateSessionParams, SessionBackend, UpstreamError};
pub use session::{issue_session, SessionRequest, SessionToken};
