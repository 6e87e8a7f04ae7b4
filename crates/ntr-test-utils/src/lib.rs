//! Testing utilities for the NTR analyzer workspace
//!
//! Shared test doubles and fixtures: scripted LLM replies, a static gene
//! directory, and in-memory host surfaces.

#![allow(missing_docs)]

use async_trait::async_trait;
use ntr_core::host::{
    EntryControl, IssuePage, OutputRegion, ReadinessSignal, ReadyListener, SettingsStore,
    Subscription,
};
use ntr_llm::{ChatClient, ChatError};
use ntr_lookup::{GeneDirectory, LookupError};
use ntr_model::{GeneRecord, GeneSource, IssueContext};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Chat client that replays queued replies and records every prompt.
#[derive(Default)]
pub struct ScriptedChatClient {
    replies: Mutex<VecDeque<Result<Value, u16>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply
    pub fn push_json(&self, value: Value) {
        self.replies.lock().unwrap().push_back(Ok(value));
    }

    /// Queue an HTTP failure status
    pub fn push_status(&self, status: u16) {
        self.replies.lock().unwrap().push_back(Err(status));
    }

    /// Prompts received so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn complete_json(&self, prompt: &str) -> Result<Value, ChatError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted chat reply left for this prompt");
        reply.map_err(|status| ChatError::Status { status })
    }
}

/// Factory handing the same scripted client to every run, whatever the
/// credential says.
pub struct SharedChatFactory {
    client: Arc<ScriptedChatClient>,
}

impl SharedChatFactory {
    pub fn new(client: Arc<ScriptedChatClient>) -> Self {
        Self { client }
    }
}

impl ntr_core::ChatClientFactory for SharedChatFactory {
    fn for_credential(&self, _credential: &str) -> Arc<dyn ChatClient> {
        Arc::clone(&self.client) as Arc<dyn ChatClient>
    }
}

/// Gene directory with preset results that records which path was taken.
#[derive(Default)]
pub struct StaticGeneDirectory {
    human: Option<GeneRecord>,
    non_human: Option<GeneRecord>,
    calls: Mutex<Vec<String>>,
}

impl StaticGeneDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_human(mut self, record: GeneRecord) -> Self {
        self.human = Some(record);
        self
    }

    pub fn with_non_human(mut self, record: GeneRecord) -> Self {
        self.non_human = Some(record);
        self
    }

    /// Adapter invocations so far, as `"human:SYMBOL"` / `"non-human:SYMBOL:ORGANISM"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeneDirectory for StaticGeneDirectory {
    async fn lookup_human(&self, symbol: &str) -> Result<Option<GeneRecord>, LookupError> {
        self.calls.lock().unwrap().push(format!("human:{symbol}"));
        Ok(self.human.clone())
    }

    async fn lookup_non_human(
        &self,
        symbol: &str,
        organism: &str,
    ) -> Result<Option<GeneRecord>, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("non-human:{symbol}:{organism}"));
        Ok(self.non_human.clone())
    }
}

/// Gene directory whose lookups always fail at the transport level
pub struct FailingGeneDirectory {
    status: u16,
}

impl FailingGeneDirectory {
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

#[async_trait]
impl GeneDirectory for FailingGeneDirectory {
    async fn lookup_human(&self, _symbol: &str) -> Result<Option<GeneRecord>, LookupError> {
        Err(LookupError::Status {
            provider: "HGNC",
            status: self.status,
        })
    }

    async fn lookup_non_human(
        &self,
        _symbol: &str,
        _organism: &str,
    ) -> Result<Option<GeneRecord>, LookupError> {
        Err(LookupError::Status {
            provider: "NCBI esearch",
            status: self.status,
        })
    }
}

/// In-memory settings store
#[derive(Default)]
pub struct MemorySettingsStore {
    credential: Mutex<Option<String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            credential: Mutex::new(Some(credential.into())),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn credential(&self) -> Option<String> {
        self.credential.lock().unwrap().clone()
    }

    async fn set_credential(&self, value: String) {
        *self.credential.lock().unwrap() = Some(value);
    }
}

/// Output region that records every overwrite
#[derive(Default)]
pub struct RecordingOutputRegion {
    writes: Mutex<Vec<String>>,
}

impl RecordingOutputRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.writes.lock().unwrap().last().cloned()
    }
}

impl OutputRegion for RecordingOutputRegion {
    fn replace(&self, html: &str) {
        self.writes.lock().unwrap().push(html.to_string());
    }
}

/// Entry control that records every enabled/disabled toggle
#[derive(Default)]
pub struct TestEntryControl {
    states: Mutex<Vec<bool>>,
}

impl TestEntryControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<bool> {
        self.states.lock().unwrap().clone()
    }

    /// Last toggle, or `None` if the control was never touched
    pub fn is_enabled(&self) -> Option<bool> {
        self.states.lock().unwrap().last().copied()
    }
}

impl EntryControl for TestEntryControl {
    fn set_enabled(&self, enabled: bool) {
        self.states.lock().unwrap().push(enabled);
    }
}

/// Fixed issue page
pub struct StaticIssuePage {
    context: IssueContext,
    labels: Vec<String>,
}

impl StaticIssuePage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            context: IssueContext::new(title, body),
            labels: vec!["new term request".to_string()],
        }
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }
}

impl IssuePage for StaticIssuePage {
    fn issue_context(&self) -> IssueContext {
        self.context.clone()
    }

    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }
}

/// Readiness signal fired manually from tests
#[derive(Default)]
pub struct ManualReadiness {
    listeners: Arc<Mutex<Vec<ReadyListener>>>,
}

impl ManualReadiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal, as the host would when the anchor appears
    pub fn fire(&self) {
        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl ReadinessSignal for ManualReadiness {
    fn subscribe(&self, listener: ReadyListener) -> Subscription {
        let listeners = Arc::clone(&self.listeners);
        listeners.lock().unwrap().push(listener);
        let slot = Arc::clone(&self.listeners);
        Subscription::new(move || slot.lock().unwrap().clear())
    }
}

/// Canned final-analysis JSON with one OK check per field, in order
pub fn analysis_value(summary: &str, fields: &[&str]) -> Value {
    let checks: Vec<Value> = fields
        .iter()
        .map(|field| {
            json!({
                "field": field,
                "status": "OK",
                "comment": format!("{field} looks fine")
            })
        })
        .collect();
    json!({
        "summary": summary,
        "checks": checks,
        "recommendedAction": "READY_FOR_CURATOR",
        "actionComment": "All template fields are in order"
    })
}

/// A found HGNC record for BRCA1
pub fn brca1_record() -> GeneRecord {
    GeneRecord::new(
        GeneSource::Hgnc,
        "HGNC:1100",
        "BRCA1 DNA repair associated",
        "https://www.genenames.org/data/gene-symbol-report/#!/hgnc_id/HGNC:1100",
    )
}

/// A found NCBI record for feline KIT
pub fn feline_kit_record() -> GeneRecord {
    GeneRecord::new(
        GeneSource::Ncbi,
        "493997",
        "KIT proto-oncogene, receptor tyrosine kinase",
        "https://www.ncbi.nlm.nih.gov/gene/493997",
    )
}
