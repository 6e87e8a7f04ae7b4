//! Shared data model for the NTR analyzer
//!
//! Defines the types that flow through the analysis pipeline:
//! - Issue input captured from the host page
//! - Gene queries and normalized gene records
//! - The structured analysis report and its checklist items
//! - The pipeline-level error taxonomy
//!
//! Every analysis run is independent and stateless: values here are
//! constructed fresh per run and never persisted.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod report;
pub mod types;

// Re-exports for convenience
pub use error::AnalysisError;
pub use report::{AnalysisReport, CheckItem, CheckStatus};
pub use types::{GeneQuery, GeneRecord, GeneSource, IssueContext, RunId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
