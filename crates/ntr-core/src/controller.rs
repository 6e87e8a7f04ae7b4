//! Page controller
//!
//! One controller is constructed per page view. It owns the entry-control
//! lifecycle: label-gated, idempotent installation, the analyze action
//! (disable → run → render → re-enable), and the readiness subscription.

use crate::host::{
    EntryControl, IssuePage, OutputRegion, ReadinessSignal, SettingsStore, Subscription,
};
use crate::pipeline::AnalysisPipeline;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Issue label required for the analyzer to install at all
pub const REQUIRED_LABEL: &str = "new term request";

/// Host surfaces the controller is wired to
#[derive(Clone)]
pub struct HostBindings {
    pub settings: Arc<dyn SettingsStore>,
    pub page: Arc<dyn IssuePage>,
    pub control: Arc<dyn EntryControl>,
    pub output: Arc<dyn OutputRegion>,
}

/// Per-page-view controller
///
/// Construction is cheap; installation is explicit and idempotent — a
/// second install attempt is a no-op rather than a hidden global flag.
pub struct AnalyzerController {
    pipeline: AnalysisPipeline,
    host: HostBindings,
    installed: AtomicBool,
}

impl AnalyzerController {
    /// Create a controller from the pipeline and its host surfaces
    #[must_use]
    pub fn new(pipeline: AnalysisPipeline, host: HostBindings) -> Arc<Self> {
        Arc::new(Self {
            pipeline,
            host,
            installed: AtomicBool::new(false),
        })
    }

    /// Install the entry control if the page qualifies.
    ///
    /// Returns `true` only on the first successful installation. Pages
    /// without the required label never install; repeated readiness firings
    /// after a successful install are no-ops.
    pub fn install(&self) -> bool {
        let labels = self.host.page.labels();
        if !labels.iter().any(|label| label == REQUIRED_LABEL) {
            tracing::debug!("issue lacks the '{REQUIRED_LABEL}' label; analyzer not installed");
            return false;
        }
        if self.installed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.host.control.set_enabled(true);
        tracing::info!("analyzer entry control installed");
        true
    }

    /// Whether the entry control has been installed on this page view
    #[inline]
    #[must_use]
    pub fn installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    /// Subscribe this controller to the host's readiness signal.
    ///
    /// The listener installs on every firing (idempotently); the caller
    /// owns the subscription and cancels it once installation succeeded,
    /// or keeps it live across in-page navigations.
    #[must_use]
    pub fn attach(self: &Arc<Self>, signal: &dyn ReadinessSignal) -> Subscription {
        let controller = Arc::clone(self);
        signal.subscribe(Arc::new(move || {
            controller.install();
        }))
    }

    /// The analyze action.
    ///
    /// Disables the entry control for the duration of the run (a second
    /// activation is impossible while disabled), captures the issue once,
    /// runs the pipeline, overwrites the output region with the rendered
    /// outcome, and re-enables the control in all cases.
    pub async fn analyze(&self) {
        self.host.control.set_enabled(false);

        let issue = self.host.page.issue_context();
        let result = self.pipeline.run(&issue, self.host.output.as_ref()).await;
        self.host.output.replace(&ntr_render::render(&result));

        self.host.control.set_enabled(true);
    }
}
