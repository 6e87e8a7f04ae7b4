//! Title/workflow classification
//!
//! Workflow selection is a local string-prefix test with no network call.
//! Gene/species extraction, by contrast, delegates to a constrained LLM
//! prompt and is only invoked on the gene path.

use crate::prompt;
use ntr_llm::ChatClient;
use ntr_model::{AnalysisError, GeneQuery};

/// Literal title marker that selects the gene workflow
pub const GENE_MARKER: &str = "[NTR/gene]";

/// Analysis workflow for an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Gene workflow: enrichment before the final analysis
    Gene,
    /// Simple workflow: straight to the final analysis
    Simple,
}

impl Workflow {
    /// Select the workflow for a title.
    ///
    /// The trimmed title starting with the literal marker selects the gene
    /// workflow; anything else selects the simple workflow.
    #[must_use]
    pub fn for_title(title: &str) -> Self {
        if title.trim().starts_with(GENE_MARKER) {
            Self::Gene
        } else {
            Self::Simple
        }
    }

    /// Number of checklist fields the workflow's final analysis carries
    #[inline]
    #[must_use]
    pub fn check_field_count(&self) -> usize {
        match self {
            Self::Gene => prompt::GENE_CHECK_FIELDS.len(),
            Self::Simple => prompt::SIMPLE_CHECK_FIELDS.len(),
        }
    }
}

/// Extract a gene query from a gene-workflow title via the model.
///
/// # Errors
/// - `ClassificationFailed` if the call fails or the output is not the
///   expected JSON shape
/// - `MissingGeneSymbol` if the output parses but carries no usable gene
///   symbol — a terminal error for the run, never a silent downgrade to
///   the simple workflow
pub async fn extract_gene_query(
    chat: &dyn ChatClient,
    title: &str,
) -> Result<GeneQuery, AnalysisError> {
    let value = chat
        .complete_json(&prompt::extraction_prompt(title))
        .await
        .map_err(|e| AnalysisError::ClassificationFailed(e.to_string()))?;

    let query: GeneQuery = serde_json::from_value(value)
        .map_err(|e| AnalysisError::ClassificationFailed(e.to_string()))?;

    let Some(symbol) = normalize(query.gene_symbol) else {
        return Err(AnalysisError::MissingGeneSymbol);
    };
    let animal = normalize(query.animal);

    tracing::debug!(%symbol, animal = animal.as_deref().unwrap_or("human"), "extracted gene query");
    Ok(GeneQuery {
        gene_symbol: Some(symbol),
        animal,
    })
}

/// Blank strings from the model count as absent.
fn normalize(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ntr_llm::ChatError;
    use serde_json::{json, Value};

    mockall::mock! {
        Chat {}

        #[async_trait]
        impl ChatClient for Chat {
            async fn complete_json(&self, prompt: &str) -> Result<Value, ChatError>;
        }
    }

    #[test]
    fn marker_prefix_selects_gene_workflow() {
        assert_eq!(Workflow::for_title("[NTR/gene] KIT in cats"), Workflow::Gene);
        assert_eq!(Workflow::for_title("  [NTR/gene] BRCA1"), Workflow::Gene);
        assert_eq!(Workflow::for_title("[NTR/gene]"), Workflow::Gene);
    }

    #[test]
    fn other_titles_select_simple_workflow() {
        assert_eq!(Workflow::for_title("[NTR] fibrosis"), Workflow::Simple);
        assert_eq!(Workflow::for_title("New disease term"), Workflow::Simple);
        assert_eq!(Workflow::for_title("gene [NTR/gene]"), Workflow::Simple);
        assert_eq!(Workflow::for_title(""), Workflow::Simple);
    }

    #[test]
    fn workflow_check_field_counts() {
        assert_eq!(Workflow::Gene.check_field_count(), 6);
        assert_eq!(Workflow::Simple.check_field_count(), 5);
    }

    #[tokio::test]
    async fn extraction_returns_normalized_query() {
        let mut chat = MockChat::new();
        chat.expect_complete_json()
            .withf(|prompt| prompt.contains("[NTR/gene] KIT in cats"))
            .returning(|_| Ok(json!({"animal": "Felis catus", "geneSymbol": " KIT "})));

        let query = extract_gene_query(&chat, "[NTR/gene] KIT in cats")
            .await
            .unwrap();
        assert_eq!(query.gene_symbol.as_deref(), Some("KIT"));
        assert_eq!(query.animal.as_deref(), Some("Felis catus"));
    }

    #[tokio::test]
    async fn extraction_without_symbol_is_missing_gene_symbol() {
        let mut chat = MockChat::new();
        chat.expect_complete_json()
            .returning(|_| Ok(json!({"geneSymbol": null})));

        let err = extract_gene_query(&chat, "[NTR/gene] something vague")
            .await
            .unwrap_err();
        assert_eq!(err, AnalysisError::MissingGeneSymbol);
    }

    #[tokio::test]
    async fn blank_symbol_is_missing_gene_symbol() {
        let mut chat = MockChat::new();
        chat.expect_complete_json()
            .returning(|_| Ok(json!({"animal": null, "geneSymbol": "   "})));

        let err = extract_gene_query(&chat, "[NTR/gene] ???").await.unwrap_err();
        assert_eq!(err, AnalysisError::MissingGeneSymbol);
    }

    #[tokio::test]
    async fn chat_failure_is_classification_failed() {
        let mut chat = MockChat::new();
        chat.expect_complete_json()
            .returning(|_| Err(ChatError::Status { status: 500 }));

        let err = extract_gene_query(&chat, "[NTR/gene] KIT").await.unwrap_err();
        assert!(matches!(err, AnalysisError::ClassificationFailed(_)));
    }

    #[tokio::test]
    async fn blank_animal_normalizes_to_human() {
        let mut chat = MockChat::new();
        chat.expect_complete_json()
            .returning(|_| Ok(json!({"animal": "", "geneSymbol": "BRCA1"})));

        let query = extract_gene_query(&chat, "[NTR/gene] BRCA1").await.unwrap();
        assert!(!query.is_non_human());
    }
}
