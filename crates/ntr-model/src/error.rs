//! Error taxonomy for the analysis pipeline
//!
//! Every stage-level failure is converted into `AnalysisError` at the
//! pipeline boundary; no raw transport or parse error reaches the render
//! layer. All failures are terminal for the current run — nothing is
//! retried automatically.

/// Pipeline-level analysis error
///
/// Note: "queried, not found" during enrichment is NOT an error; it flows
/// through the pipeline as an empty gene record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// No API credential configured; the run never starts classifying
    #[error("OpenAI API Key not set.")]
    CredentialMissing,

    /// Title carries the gene marker but no gene symbol could be extracted
    #[error("Title starts with [NTR/gene] but could not extract a gene symbol.")]
    MissingGeneSymbol,

    /// Gene/species extraction produced unusable output
    #[error("classification failed: {0}")]
    ClassificationFailed(String),

    /// Broker- or network-level enrichment failure
    #[error("gene enrichment failed: {0}")]
    EnrichmentTransportFailed(String),

    /// Final analysis call failed (transport or non-JSON output)
    #[error("final analysis failed: {0}")]
    FinalizationFailed(String),

    /// Final analysis response violated the expected shape
    #[error("Analysis response from AI was malformed: {0}")]
    MalformedUpstreamResponse(String),
}

impl AnalysisError {
    /// Check if the run failed before any network call was made
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::CredentialMissing)
    }

    /// Check if the failure was a shape violation in the model's output
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedUpstreamResponse(_))
    }
}
