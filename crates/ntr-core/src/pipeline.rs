//! Analysis pipeline
//!
//! One logical flow per analyze action, modeled as an explicit state
//! machine: `Idle → Classifying → (EnrichingGene)? → Finalizing →
//! Rendered | Failed`. Stages never run concurrently within a run; every
//! network call is a suspension point. Nothing is retried — each failure is
//! terminal for the run and surfaced through [`ntr_model::AnalysisError`].

use crate::classifier::{extract_gene_query, Workflow};
use crate::host::{OutputRegion, SettingsStore};
use crate::prompt;
use ntr_broker::{BrokerHandle, LookupRequest, LookupResponse};
use ntr_llm::ChatClient;
use ntr_model::{AnalysisError, AnalysisReport, GeneQuery, GeneRecord, IssueContext, RunId};
use std::sync::Arc;

/// Pipeline run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Classifying,
    EnrichingGene,
    Finalizing,
    Rendered,
    Failed,
}

impl RunState {
    /// States a run may legally move to from `self`
    #[must_use]
    pub fn allowed_transitions(self) -> Vec<RunState> {
        use RunState::*;
        match self {
            Idle => vec![Classifying, Failed],
            Classifying => vec![EnrichingGene, Finalizing, Failed],
            EnrichingGene => vec![Finalizing, Failed],
            Finalizing => vec![Rendered, Failed],
            Rendered => vec![],
            Failed => vec![],
        }
    }

    /// Whether moving to `to` is a legal transition
    #[must_use]
    pub fn can_move_to(self, to: RunState) -> bool {
        self.allowed_transitions().into_iter().any(|s| s == to)
    }
}

/// Builds a chat client bound to the user's credential at run time.
///
/// The credential is read from the settings store on every analyze action,
/// so clients cannot be constructed ahead of time.
pub trait ChatClientFactory: Send + Sync {
    fn for_credential(&self, credential: &str) -> Arc<dyn ChatClient>;
}

/// The analysis pipeline
///
/// Holds the collaborators that outlive a single run; all per-run state
/// lives on the stack of [`AnalysisPipeline::run`].
pub struct AnalysisPipeline {
    settings: Arc<dyn SettingsStore>,
    chat_factory: Arc<dyn ChatClientFactory>,
    broker: BrokerHandle,
}

impl AnalysisPipeline {
    /// Create a pipeline from its collaborators
    #[must_use]
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        chat_factory: Arc<dyn ChatClientFactory>,
        broker: BrokerHandle,
    ) -> Self {
        Self {
            settings,
            chat_factory,
            broker,
        }
    }

    /// Run one analysis over the captured issue.
    ///
    /// Progress strings are written to `progress` between states; they are
    /// advisory and are overwritten by the final render.
    ///
    /// # Errors
    /// Every stage failure is converted into [`AnalysisError`]; see the
    /// taxonomy on that type.
    pub async fn run(
        &self,
        issue: &IssueContext,
        progress: &dyn OutputRegion,
    ) -> Result<AnalysisReport, AnalysisError> {
        let run_id = RunId::new();
        let mut state = RunState::Idle;

        let result = self.run_inner(run_id, &mut state, issue, progress).await;
        match &result {
            Ok(report) => {
                advance(run_id, &mut state, RunState::Rendered);
                tracing::info!(%run_id, checks = report.checks.len(), "analysis completed");
            }
            Err(error) => {
                // Failed is reachable from every non-terminal state.
                let from = state;
                state = RunState::Failed;
                tracing::error!(%run_id, %error, from = ?from, to = ?state, "analysis failed");
            }
        }
        result
    }

    async fn run_inner(
        &self,
        run_id: RunId,
        state: &mut RunState,
        issue: &IssueContext,
        progress: &dyn OutputRegion,
    ) -> Result<AnalysisReport, AnalysisError> {
        // Guard: without a credential the run never enters Classifying.
        let credential = self
            .settings
            .credential()
            .await
            .filter(|value| !value.trim().is_empty())
            .ok_or(AnalysisError::CredentialMissing)?;
        let chat = self.chat_factory.for_credential(&credential);

        advance(run_id, state, RunState::Classifying);
        match Workflow::for_title(&issue.title) {
            Workflow::Gene => {
                self.run_gene_workflow(run_id, state, issue, progress, chat.as_ref())
                    .await
            }
            Workflow::Simple => {
                self.run_simple_workflow(run_id, state, issue, progress, chat.as_ref())
                    .await
            }
        }
    }

    async fn run_gene_workflow(
        &self,
        run_id: RunId,
        state: &mut RunState,
        issue: &IssueContext,
        progress: &dyn OutputRegion,
        chat: &dyn ChatClient,
    ) -> Result<AnalysisReport, AnalysisError> {
        progress.replace("<p>Step 1/3: Extracting gene & species info from title...</p>");
        let query = extract_gene_query(chat, &issue.title).await?;

        advance(run_id, state, RunState::EnrichingGene);
        progress.replace(&enrichment_progress(&query));
        let details = self.enrich(query).await?;

        advance(run_id, state, RunState::Finalizing);
        progress.replace("<p>Step 3/3: Compiling final analysis...</p>");
        let prompt = prompt::final_analysis_prompt(&issue.body, details.as_ref());
        let value = chat
            .complete_json(&prompt)
            .await
            .map_err(|e| AnalysisError::FinalizationFailed(e.to_string()))?;
        AnalysisReport::from_value(&value)
    }

    async fn run_simple_workflow(
        &self,
        run_id: RunId,
        state: &mut RunState,
        issue: &IssueContext,
        progress: &dyn OutputRegion,
        chat: &dyn ChatClient,
    ) -> Result<AnalysisReport, AnalysisError> {
        advance(run_id, state, RunState::Finalizing);
        progress.replace("<p>Analyzing as a standard term...</p>");
        let prompt = prompt::simple_analysis_prompt(&issue.body);
        let value = chat
            .complete_json(&prompt)
            .await
            .map_err(|e| AnalysisError::FinalizationFailed(e.to_string()))?;
        AnalysisReport::from_value(&value)
    }

    /// Dispatch the enrichment lookup through the broker.
    ///
    /// A success with no details is a valid "queried, not found" outcome
    /// and flows into the MISSING prompt instruction, not an error.
    async fn enrich(&self, query: GeneQuery) -> Result<Option<GeneRecord>, AnalysisError> {
        let request = LookupRequest::for_query(query);
        let response = self
            .broker
            .dispatch(request)
            .await
            .map_err(|e| AnalysisError::EnrichmentTransportFailed(e.to_string()))?;
        match response {
            LookupResponse::Success { details } => Ok(details),
            LookupResponse::Error { message } => {
                Err(AnalysisError::EnrichmentTransportFailed(message))
            }
        }
    }
}

fn enrichment_progress(query: &GeneQuery) -> String {
    let symbol = query.gene_symbol.as_deref().unwrap_or_default();
    match query.animal.as_deref() {
        Some(animal) => {
            format!("<p>Step 2/3: Searching NCBI for gene \"{symbol}\" in {animal}...</p>")
        }
        None => format!("<p>Step 2/3: Searching HGNC for human gene \"{symbol}\"...</p>"),
    }
}

fn advance(run_id: RunId, state: &mut RunState, to: RunState) {
    debug_assert!(
        state.can_move_to(to),
        "illegal pipeline transition {state:?} -> {to:?}"
    );
    tracing::debug!(%run_id, from = ?state, to = ?to, "pipeline state transition");
    *state = to;
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ntr_broker::LookupBroker;
    use ntr_lookup::{GeneDirectory, LookupError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoCredentialStore;

    #[async_trait]
    impl SettingsStore for NoCredentialStore {
        async fn credential(&self) -> Option<String> {
            None
        }
        async fn set_credential(&self, _value: String) {}
    }

    struct BlankCredentialStore;

    #[async_trait]
    impl SettingsStore for BlankCredentialStore {
        async fn credential(&self) -> Option<String> {
            Some("   ".into())
        }
        async fn set_credential(&self, _value: String) {}
    }

    /// Factory that counts invocations; the guard must fire before it.
    #[derive(Default)]
    struct CountingFactory {
        calls: AtomicUsize,
    }

    impl ChatClientFactory for CountingFactory {
        fn for_credential(&self, _credential: &str) -> Arc<dyn ChatClient> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            unreachable!("tests with this factory never get past the guard")
        }
    }

    struct UnusedDirectory;

    #[async_trait]
    impl GeneDirectory for UnusedDirectory {
        async fn lookup_human(
            &self,
            _symbol: &str,
        ) -> Result<Option<GeneRecord>, LookupError> {
            Ok(None)
        }
        async fn lookup_non_human(
            &self,
            _symbol: &str,
            _organism: &str,
        ) -> Result<Option<GeneRecord>, LookupError> {
            Ok(None)
        }
    }

    struct SilentRegion;

    impl OutputRegion for SilentRegion {
        fn replace(&self, _html: &str) {}
    }

    fn pipeline(settings: Arc<dyn SettingsStore>, factory: Arc<CountingFactory>) -> AnalysisPipeline {
        let broker = LookupBroker::spawn(Arc::new(UnusedDirectory));
        AnalysisPipeline::new(settings, factory, broker)
    }

    #[tokio::test]
    async fn absent_credential_never_reaches_classifying() {
        let factory = Arc::new(CountingFactory::default());
        let pipeline = pipeline(Arc::new(NoCredentialStore), Arc::clone(&factory));

        let issue = IssueContext::new("[NTR/gene] BRCA1", "body");
        let err = pipeline.run(&issue, &SilentRegion).await.unwrap_err();

        assert_eq!(err, AnalysisError::CredentialMissing);
        assert_eq!(factory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_credential_counts_as_absent() {
        let factory = Arc::new(CountingFactory::default());
        let pipeline = pipeline(Arc::new(BlankCredentialStore), Arc::clone(&factory));

        let issue = IssueContext::new("New disease term", "body");
        let err = pipeline.run(&issue, &SilentRegion).await.unwrap_err();
        assert_eq!(err, AnalysisError::CredentialMissing);
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(RunState::Rendered.allowed_transitions().is_empty());
        assert!(RunState::Failed.allowed_transitions().is_empty());
    }

    #[test]
    fn happy_paths_are_legal() {
        // Gene path
        assert!(RunState::Idle.can_move_to(RunState::Classifying));
        assert!(RunState::Classifying.can_move_to(RunState::EnrichingGene));
        assert!(RunState::EnrichingGene.can_move_to(RunState::Finalizing));
        assert!(RunState::Finalizing.can_move_to(RunState::Rendered));
        // Simple path skips enrichment
        assert!(RunState::Classifying.can_move_to(RunState::Finalizing));
        // No way back
        assert!(!RunState::Finalizing.can_move_to(RunState::Classifying));
        assert!(!RunState::EnrichingGene.can_move_to(RunState::Classifying));
    }
}
