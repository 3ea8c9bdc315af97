//! Readiness polling for the externally loaded widget element
//!
//! The widget script registers a custom element when it finishes loading.
//! [`ReadinessPoll`] is the state machine that decides, one check at a time,
//! whether that has happened; [`wait_until_settled`] drives it with a
//! [`Ticker`] until it reaches a terminal state or is cancelled.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Custom element the widget script defines
pub const WIDGET_ELEMENT: &str = "openai-chatkit";

/// Where the widget script is loaded from
pub const WIDGET_SCRIPT_URL: &str = "https://cdn.platform.openai.com/deployments/chatkit/chatkit.js";

/// Shown when the element never registers
pub const LOAD_FAILURE_MESSAGE: &str = "Chat widget failed to load. Confirm https://cdn.platform.openai.com/deployments/chatkit/chatkit.js is accessible and your domain is allowlisted.";

/// Lookup into the element registry
pub trait ElementRegistry: Send + Sync {
    /// Whether `name` has been defined
    fn is_defined(&self, name: &str) -> bool;
}

impl<F> ElementRegistry for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_defined(&self, name: &str) -> bool {
        self(name)
    }
}

/// In-process element registry
///
/// Cloning shares the same set of definitions.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    defined: Arc<RwLock<HashSet<String>>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`. Returns false if it was already defined.
    pub fn define(&self, name: impl Into<String>) -> bool {
        self.defined.write().insert(name.into())
    }
}

impl ElementRegistry for SharedRegistry {
    fn is_defined(&self, name: &str) -> bool {
        self.defined.read().contains(name)
    }
}

/// Readiness of the widget element for one mount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Pending,
    Ready,
    Failed,
}

impl Readiness {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Readiness::Pending)
    }
}

/// Polling period and attempt budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: 120,
        }
    }
}

impl PollPolicy {
    /// Longest time a mount can spend pending
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// Bounded readiness check state machine
#[derive(Debug, Clone)]
pub struct ReadinessPoll {
    element: String,
    policy: PollPolicy,
    attempts: u32,
    state: Readiness,
}

impl ReadinessPoll {
    /// Check once up front; an element that is already defined makes the
    /// poll Ready without any ticks.
    pub fn start(registry: &dyn ElementRegistry, element: &str, policy: PollPolicy) -> Self {
        let state = if registry.is_defined(element) {
            Readiness::Ready
        } else {
            Readiness::Pending
        };

        Self {
            element: element.to_string(),
            policy,
            attempts: 0,
            state,
        }
    }

    /// One poll attempt. Terminal states are sticky and do not re-check.
    pub fn tick(&mut self, registry: &dyn ElementRegistry) -> Readiness {
        if self.state.is_terminal() {
            return self.state;
        }

        self.attempts += 1;
        if registry.is_defined(&self.element) {
            self.state = Readiness::Ready;
        } else if self.attempts >= self.policy.max_attempts {
            self.state = Readiness::Failed;
        }
        self.state
    }

    pub fn state(&self) -> Readiness {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }
}

/// Source of poll ticks
#[async_trait]
pub trait Ticker: Send {
    /// Wait for the next tick
    async fn tick(&mut self);
}

/// Ticker backed by `tokio::time::interval`
///
/// The first tick fires one full period after creation.
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Drive `poll` until it settles.
///
/// Returns `None` when `cancel` fires first; no further checks happen after
/// cancellation.
pub async fn wait_until_settled(
    poll: &mut ReadinessPoll,
    registry: &dyn ElementRegistry,
    ticker: &mut dyn Ticker,
    cancel: &CancellationToken,
) -> Option<Readiness> {
    while !poll.state().is_terminal() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return None,
            _ = ticker.tick() => {
                poll.tick(registry);
            }
        }
    }
    Some(poll.state())
}
