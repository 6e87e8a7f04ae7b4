//! NTR Core - analysis pipeline orchestration
//!
//! The central piece of the analyzer:
//! - Classifies an issue title into the gene or simple workflow
//! - Requests gene enrichment through the lookup broker when needed
//! - Assembles prompts that embed verified external facts
//! - Normalizes the model's answer into a fixed analysis record
//! - Owns the per-page controller that wires the host surfaces together
//!
//! # Example
//!
//! ```rust,ignore
//! use ntr_core::{AnalyzerConfig, AnalysisPipeline};
//! use ntr_broker::LookupBroker;
//! use std::sync::Arc;
//!
//! # async fn example(settings: Arc<dyn ntr_core::SettingsStore>) {
//! let config = AnalyzerConfig::new();
//! let broker = LookupBroker::spawn(Arc::new(config.gene_directory()));
//! let pipeline = AnalysisPipeline::new(settings, Arc::new(config.chat_factory()), broker);
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod classifier;
pub mod config;
pub mod controller;
pub mod host;
pub mod pipeline;
pub mod prompt;

// Re-exports for convenience
pub use classifier::{Workflow, GENE_MARKER};
pub use config::{AnalyzerConfig, OpenAiChatFactory};
pub use controller::{AnalyzerController, HostBindings, REQUIRED_LABEL};
pub use host::{
    EntryControl, IssuePage, OutputRegion, ReadinessSignal, ReadyListener, SettingsStore,
    Subscription,
};
pub use pipeline::{AnalysisPipeline, ChatClientFactory, RunState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
