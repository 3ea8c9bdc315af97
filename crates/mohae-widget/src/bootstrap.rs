//! Mounting the widget
//!
//! A [`Mount`] is one instance of the chat panel. It starts by checking
//! whether the widget element is already registered and otherwise polls in
//! the background. Only once the element is ready does the mount hand out a
//! [`WidgetControl`], so nothing can request a client secret before the
//! widget is rendered.

use crate::locale::Language;
use crate::observer::{dispatch, TracingObserver, WidgetEvent, WidgetObserver, UNEXPECTED_ERROR_MESSAGE};
use crate::options::WidgetOptions;
use crate::readiness::{
    wait_until_settled, ElementRegistry, IntervalTicker, PollPolicy, Readiness, ReadinessPoll,
    Ticker, LOAD_FAILURE_MESSAGE, WIDGET_ELEMENT,
};
use crate::token::{ClientSecretSource, TokenFetchError};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Placeholder text while the element is still pending
pub const LOADING_MESSAGE: &str = "Loading ChatKit widget...";

#[derive(Debug)]
struct MountInner {
    readiness: Readiness,
    error: Option<String>,
    mounted: bool,
    writes_after_unmount: u32,
}

/// State shared by a mount, its poll task and its control
#[derive(Debug)]
struct MountState {
    inner: Mutex<MountInner>,
}

impl MountState {
    fn new(readiness: Readiness) -> Self {
        Self {
            inner: Mutex::new(MountInner {
                readiness,
                error: None,
                mounted: true,
                writes_after_unmount: 0,
            }),
        }
    }

    /// Apply `f` unless the mount is gone. Returns whether it was applied.
    fn update(&self, f: impl FnOnce(&mut MountInner)) -> bool {
        let mut inner = self.inner.lock();
        if !inner.mounted {
            inner.writes_after_unmount += 1;
            debug!("Ignoring widget state update after unmount");
            return false;
        }
        f(&mut inner);
        true
    }

    fn unmount(&self) {
        self.inner.lock().mounted = false;
    }

    fn readiness(&self) -> Readiness {
        self.inner.lock().readiness
    }

    fn error(&self) -> Option<String> {
        self.inner.lock().error.clone()
    }
}

/// What the chat panel should show
#[derive(Debug)]
pub enum View<'a> {
    /// The widget, bound to its control
    Widget(&'a WidgetControl),
    /// A message in place of the widget
    Placeholder(String),
}

/// Creates mounts wired to a registry, a client-secret source and an
/// observer.
pub struct Bootstrapper {
    registry: Arc<dyn ElementRegistry>,
    source: Arc<dyn ClientSecretSource>,
    observer: Arc<dyn WidgetObserver>,
    policy: PollPolicy,
    element: String,
}

impl Bootstrapper {
    pub fn new(registry: Arc<dyn ElementRegistry>, source: Arc<dyn ClientSecretSource>) -> Self {
        Self {
            registry,
            source,
            observer: Arc::new(TracingObserver),
            policy: PollPolicy::default(),
            element: WIDGET_ELEMENT.to_string(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn WidgetObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Mount using a `tokio` interval for polling. Must be called inside a
    /// tokio runtime.
    pub fn mount(&self, language: Language) -> Mount {
        let ticker = IntervalTicker::new(self.policy.interval);
        self.mount_with_ticker(language, Box::new(ticker))
    }

    /// Mount with an explicit tick source
    pub fn mount_with_ticker(&self, language: Language, mut ticker: Box<dyn Ticker>) -> Mount {
        let mut poll = ReadinessPoll::start(self.registry.as_ref(), &self.element, self.policy);
        let state = Arc::new(MountState::new(poll.state()));
        let cancel = CancellationToken::new();

        let control = WidgetControl {
            options: WidgetOptions::for_language(language),
            source: self.source.clone(),
            observer: self.observer.clone(),
            state: state.clone(),
        };

        let task = if poll.state() == Readiness::Pending {
            let registry = self.registry.clone();
            let state = state.clone();
            let cancel = cancel.clone();
            let element = self.element.clone();

            Some(tokio::spawn(async move {
                let outcome =
                    wait_until_settled(&mut poll, registry.as_ref(), ticker.as_mut(), &cancel).await;

                match outcome {
                    Some(Readiness::Ready) => {
                        if state.update(|s| {
                            s.readiness = Readiness::Ready;
                            s.error = None;
                        }) {
                            info!(attempts = poll.attempts(), "{} registered", element);
                        }
                    }
                    Some(Readiness::Failed) => {
                        if state.update(|s| {
                            s.readiness = Readiness::Failed;
                            s.error = Some(LOAD_FAILURE_MESSAGE.to_string());
                        }) {
                            warn!(attempts = poll.attempts(), "{} never registered", element);
                        }
                    }
                    Some(Readiness::Pending) => {}
                    None => debug!("Readiness poll cancelled"),
                }
            }))
        } else {
            debug!("{} already registered", self.element);
            None
        };

        Mount {
            state,
            control,
            cancel,
            task,
        }
    }
}

/// One mounted chat panel
///
/// Dropping the mount unmounts it: the poll stops and later state writes
/// are ignored.
pub struct Mount {
    state: Arc<MountState>,
    control: WidgetControl,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Mount {
    pub fn readiness(&self) -> Readiness {
        self.state.readiness()
    }

    /// Latest error to display, if any
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    /// Control for the rendered widget; `None` until Ready
    pub fn control(&self) -> Option<&WidgetControl> {
        (self.readiness() == Readiness::Ready).then_some(&self.control)
    }

    pub fn view(&self) -> View<'_> {
        match self.control() {
            Some(control) => View::Widget(control),
            None => View::Placeholder(self.error().unwrap_or_else(|| LOADING_MESSAGE.to_string())),
        }
    }

    /// Wait for the poll to reach a terminal state
    pub async fn settled(&mut self) -> Readiness {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Readiness poll task failed: {}", e);
            }
        }
        self.readiness()
    }

    /// Tear the mount down
    pub fn unmount(self) {}
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.state.unmount();
    }
}

/// Handle the rendered widget uses to reach back into this mount
#[derive(Clone)]
pub struct WidgetControl {
    options: WidgetOptions,
    source: Arc<dyn ClientSecretSource>,
    observer: Arc<dyn WidgetObserver>,
    state: Arc<MountState>,
}

impl std::fmt::Debug for WidgetControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetControl")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl WidgetControl {
    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// Latest error captured by this mount
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    /// Token callback handed to the widget.
    ///
    /// A rejection is captured as the displayed error; a success clears it.
    /// Results arriving after unmount are returned but not recorded.
    pub async fn get_client_secret(&self, current: Option<&str>) -> Result<String, TokenFetchError> {
        match self.source.client_secret(current).await {
            Ok(secret) => {
                self.state.update(|s| s.error = None);
                Ok(secret)
            }
            Err(e) => {
                warn!("Client secret fetch failed: {}", e);
                let message = e.to_string();
                self.state.update(|s| s.error = Some(message));
                Err(e)
            }
        }
    }

    /// Feed an event emitted by the widget
    pub fn handle_event(&self, event: &WidgetEvent) {
        dispatch(self.observer.as_ref(), event);

        if let WidgetEvent::Error { message } = event {
            let message = message
                .clone()
                .unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string());
            self.state.update(|s| s.error = Some(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::tests::RecordingObserver;
    use crate::readiness::tests::{CountingRegistry, CountingTicker};
    use crate::readiness::SharedRegistry;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Client-secret source that replays scripted results
    #[derive(Default)]
    struct ScriptedSource {
        results: Mutex<VecDeque<Result<String, String>>>,
        forwarded: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedSource {
        fn with(results: Vec<Result<&str, &str>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(
                    results
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                forwarded: Mutex::default(),
            })
        }
    }

    #[async_trait]
    impl ClientSecretSource for ScriptedSource {
        async fn client_secret(&self, current: Option<&str>) -> Result<String, TokenFetchError> {
            self.forwarded.lock().push(current.map(str::to_string));
            let next = self.results.lock().pop_front().expect("scripted result");
            next.map_err(|message| TokenFetchError::Rejected {
                status: 500,
                message,
            })
        }
    }

    fn ready_registry() -> Arc<SharedRegistry> {
        let registry = SharedRegistry::new();
        registry.define(WIDGET_ELEMENT);
        Arc::new(registry)
    }

    #[test]
    fn already_registered_mounts_ready_without_runtime() {
        let bootstrapper = Bootstrapper::new(ready_registry(), ScriptedSource::with(vec![]));
        let mount = bootstrapper.mount_with_ticker(Language::En, Box::<CountingTicker>::default());

        assert_eq!(mount.readiness(), Readiness::Ready);
        assert!(matches!(mount.view(), View::Widget(_)));
        assert!(mount.error().is_none());
    }

    #[tokio::test]
    async fn pending_mount_shows_loading_and_has_no_control() {
        let registry = Arc::new(CountingRegistry::never());
        let bootstrapper = Bootstrapper::new(registry, ScriptedSource::with(vec![]));
        let mount = bootstrapper.mount_with_ticker(Language::En, Box::new(PendingTicker));

        assert_eq!(mount.readiness(), Readiness::Pending);
        assert!(mount.control().is_none());
        match mount.view() {
            View::Placeholder(text) => assert_eq!(text, LOADING_MESSAGE),
            View::Widget(_) => panic!("widget rendered before ready"),
        }
    }

    #[tokio::test]
    async fn registration_during_polling_makes_mount_ready() {
        let registry = Arc::new(CountingRegistry::ready_on_tick(5));
        let bootstrapper = Bootstrapper::new(registry.clone(), ScriptedSource::with(vec![]));
        let mut mount =
            bootstrapper.mount_with_ticker(Language::Ko, Box::<CountingTicker>::default());

        assert_eq!(mount.settled().await, Readiness::Ready);
        assert_eq!(registry.checks(), 6);
        assert!(mount.error().is_none());

        let control = mount.control().expect("control once ready");
        assert_eq!(control.options().locale, Language::Ko);
    }

    #[tokio::test]
    async fn exhausted_budget_shows_terminal_error() {
        let registry = Arc::new(CountingRegistry::never());
        let bootstrapper = Bootstrapper::new(registry.clone(), ScriptedSource::with(vec![]));
        let mut mount =
            bootstrapper.mount_with_ticker(Language::En, Box::<CountingTicker>::default());

        assert_eq!(mount.settled().await, Readiness::Failed);
        assert_eq!(registry.checks(), 121);
        assert_eq!(mount.error().as_deref(), Some(LOAD_FAILURE_MESSAGE));
        assert!(mount.control().is_none());
        match mount.view() {
            View::Placeholder(text) => assert_eq!(text, LOAD_FAILURE_MESSAGE),
            View::Widget(_) => panic!("failed mount rendered the widget"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_while_pending_stops_polling() {
        let registry = Arc::new(CountingRegistry::never());
        let bootstrapper = Bootstrapper::new(registry.clone(), ScriptedSource::with(vec![]));
        let mount = bootstrapper.mount(Language::En);
        let state = mount.state.clone();

        tokio::time::sleep(Duration::from_millis(350)).await;
        let checks_at_unmount = registry.checks();
        assert_eq!(checks_at_unmount, 4);

        mount.unmount();
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(registry.checks(), checks_at_unmount);
        let inner = state.inner.lock();
        assert_eq!(inner.readiness, Readiness::Pending);
        assert_eq!(inner.writes_after_unmount, 0);
        assert!(!inner.mounted);
    }

    #[tokio::test]
    async fn token_fetch_forwards_secret_and_clears_error() {
        let source = ScriptedSource::with(vec![Err("Failed to create ChatKit session"), Ok("sk_2")]);
        let bootstrapper = Bootstrapper::new(ready_registry(), source.clone());
        let mount = bootstrapper.mount_with_ticker(Language::En, Box::<CountingTicker>::default());
        let control = mount.control().expect("ready").clone();

        let err = control.get_client_secret(None).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to create ChatKit session");
        assert_eq!(
            mount.error().as_deref(),
            Some("Failed to create ChatKit session")
        );

        let secret = control.get_client_secret(Some("sk_1")).await.unwrap();
        assert_eq!(secret, "sk_2");
        assert!(mount.error().is_none());
        assert_eq!(
            *source.forwarded.lock(),
            vec![None, Some("sk_1".to_string())]
        );
    }

    #[tokio::test]
    async fn token_result_after_unmount_is_ignored() {
        let source = ScriptedSource::with(vec![Err("late failure")]);
        let bootstrapper = Bootstrapper::new(ready_registry(), source);
        let mount = bootstrapper.mount_with_ticker(Language::En, Box::<CountingTicker>::default());
        let control = mount.control().expect("ready").clone();

        mount.unmount();

        assert!(control.get_client_secret(None).await.is_err());
        assert!(control.error().is_none());
        assert_eq!(control.state.inner.lock().writes_after_unmount, 1);
    }

    #[tokio::test]
    async fn widget_events_reach_observer_and_capture_errors() {
        let observer = Arc::new(RecordingObserver::default());
        let bootstrapper = Bootstrapper::new(ready_registry(), ScriptedSource::with(vec![]))
            .with_observer(observer.clone());
        let mount = bootstrapper.mount_with_ticker(Language::En, Box::<CountingTicker>::default());
        let control = mount.control().expect("ready");

        control.handle_event(&WidgetEvent::ResponseStart);
        control.handle_event(&WidgetEvent::ResponseEnd);
        control.handle_event(&WidgetEvent::Error { message: None });

        assert_eq!(observer.calls(), vec!["start", "end", "error:-"]);
        assert_eq!(mount.error().as_deref(), Some(UNEXPECTED_ERROR_MESSAGE));

        control.handle_event(&WidgetEvent::Error {
            message: Some("thread limit reached".to_string()),
        });
        assert_eq!(mount.error().as_deref(), Some("thread limit reached"));
        assert!(matches!(mount.view(), View::Widget(_)));
    }

    /// Ticker that never fires
    struct PendingTicker;

    #[async_trait]
    impl Ticker for PendingTicker {
        async fn tick(&mut self) {
            std::future::pending::<()>().await;
        }
    }
}
