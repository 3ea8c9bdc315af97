//! Widget bootstrapping for the Woori Mohae chat panel
//!
//! Waits for the externally loaded ChatKit element to register, then hands
//! the widget its client-secret callback, locale options and event
//! observers.
//!
//! ```rust,no_run
//! use mohae_widget::{Bootstrapper, HttpClientSecretSource, Language, SharedRegistry};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let registry = SharedRegistry::new();
//! let source = HttpClientSecretSource::for_origin("http://localhost:3000");
//! let bootstrapper = Bootstrapper::new(Arc::new(registry), Arc::new(source));
//!
//! let mut mount = bootstrapper.mount(Language::Ko);
//! mount.settled().await;
//! # }
//! ```

pub mod bootstrap;
pub mod locale;
pub mod observer;
pub mod options;
pub mod readiness;
pub mod token;

pub use bootstrap::{Bootstrapper, Mount, View, WidgetControl, LOADING_MESSAGE};
pub use locale::{Language, LocaleCopy, StarterPrompt, UnsupportedLanguage};
pub use observer::{TracingObserver, WidgetEvent, WidgetObserver};
pub use options::WidgetOptions;
pub use readiness::{
    ElementRegistry, IntervalTicker, PollPolicy, Readiness, ReadinessPoll, SharedRegistry, Ticker,
    WIDGET_ELEMENT, WIDGET_SCRIPT_URL,
};
pub use token::{ClientSecretSource, HttpClientSecretSource, TokenFetchError};
