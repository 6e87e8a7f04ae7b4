//! Host integration seams
//!
//! The browser side of the analyzer (storage, DOM surfaces, readiness
//! observation) is out of scope for this workspace; these traits are the
//! contracts the controller and pipeline call. In-memory implementations
//! for tests live in `ntr-test-utils`.

use async_trait::async_trait;
use ntr_model::IssueContext;
use std::sync::Arc;

/// Key-value store holding the single API credential
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The configured credential, if any. Blank values count as absent.
    async fn credential(&self) -> Option<String>;

    /// Persist a new credential
    async fn set_credential(&self, value: String);
}

/// The analyze button: one user-visible enabled/disabled toggle
pub trait EntryControl: Send + Sync {
    fn set_enabled(&self, enabled: bool);
}

/// The single output region the renderer overwrites wholesale.
///
/// Also carries the advisory progress strings between pipeline states;
/// last writer wins, there is no merging.
pub trait OutputRegion: Send + Sync {
    fn replace(&self, html: &str);
}

/// Read-only surface of the issue page
pub trait IssuePage: Send + Sync {
    /// Title and body, captured at call time
    fn issue_context(&self) -> IssueContext;

    /// Labels attached to the issue
    fn labels(&self) -> Vec<String>;
}

/// Listener invoked by the host when the injection anchor is present
pub type ReadyListener = Arc<dyn Fn() + Send + Sync>;

/// Readiness signal emitted by the host when the anchor structure appears.
///
/// Re-fires on in-page navigation without a full reload; listeners must
/// therefore be idempotent.
pub trait ReadinessSignal: Send + Sync {
    fn subscribe(&self, listener: ReadyListener) -> Subscription;
}

/// Cancellable registration with a [`ReadinessSignal`].
///
/// Cancellation is explicit: dropping the subscription without calling
/// [`Subscription::cancel`] leaves the registration in place.
pub struct Subscription {
    canceller: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a subscription with its cancel operation
    #[must_use]
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            canceller: Some(Box::new(cancel)),
        }
    }

    /// Unregister the listener
    pub fn cancel(mut self) {
        if let Some(cancel) = self.canceller.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.canceller.is_some())
            .finish()
    }
}
