//! Core input and enrichment types
//!
//! Covers the read-only issue input, the classifier's gene query, and the
//! normalized gene record produced by the lookup adapters.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique analysis-run identifier (ULID for sortability)
///
/// Used only for log correlation; runs are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub Ulid);

impl RunId {
    /// Generate new run ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issue input captured once per analysis run from the host page.
///
/// Read-only: the pipeline never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueContext {
    /// Issue title text
    pub title: String,
    /// Issue body text
    pub body: String,
}

impl IssueContext {
    /// Create new issue context
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Gene query extracted from an issue title.
///
/// Invariants:
/// - `animal = Some(_)` means the gene is non-human.
/// - `gene_symbol = None` means no lookup is attempted; downstream stages
///   treat the gene field as absent-by-design, not as an error.
///
/// The serde names match the extraction wire shape returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneQuery {
    /// Gene symbol, e.g. "KIT" or "BRCA1"
    #[serde(rename = "geneSymbol", default)]
    pub gene_symbol: Option<String>,
    /// Scientific name of a non-human organism, e.g. "Felis catus"
    #[serde(default)]
    pub animal: Option<String>,
}

impl GeneQuery {
    /// Query for a human gene
    #[inline]
    #[must_use]
    pub fn human(symbol: impl Into<String>) -> Self {
        Self {
            gene_symbol: Some(symbol.into()),
            animal: None,
        }
    }

    /// Query for a gene in a non-human organism
    #[inline]
    #[must_use]
    pub fn non_human(symbol: impl Into<String>, animal: impl Into<String>) -> Self {
        Self {
            gene_symbol: Some(symbol.into()),
            animal: Some(animal.into()),
        }
    }

    /// Whether the query targets a non-human organism
    #[inline]
    #[must_use]
    pub fn is_non_human(&self) -> bool {
        self.animal.is_some()
    }
}

/// Provider a gene record was normalized from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneSource {
    /// NCBI Gene (E-utilities)
    #[serde(rename = "NCBI")]
    Ncbi,
    /// HGNC (genenames.org)
    #[serde(rename = "HGNC")]
    Hgnc,
}

impl std::fmt::Display for GeneSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneSource::Ncbi => write!(f, "NCBI"),
            GeneSource::Hgnc => write!(f, "HGNC"),
        }
    }
}

/// Normalized gene record returned by a lookup adapter.
///
/// Immutable once constructed. `Option<GeneRecord>::None` after a lookup
/// means "queried, not found" — distinct from "never queried".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneRecord {
    /// Which provider produced the record
    pub source: GeneSource,
    /// Provider-scoped gene identifier
    pub gene_id: String,
    /// Full gene name
    pub gene_name: String,
    /// Stable link to the provider's gene report page
    pub gene_link: String,
}

impl GeneRecord {
    /// Create new gene record
    #[inline]
    #[must_use]
    pub fn new(
        source: GeneSource,
        gene_id: impl Into<String>,
        gene_name: impl Into<String>,
        gene_link: impl Into<String>,
    ) -> Self {
        Self {
            source,
            gene_id: gene_id.into(),
            gene_name: gene_name.into(),
            gene_link: gene_link.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_generation() {
        let id1 = RunId::new();
        let id2 = RunId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn gene_query_human_has_no_animal() {
        let q = GeneQuery::human("BRCA1");
        assert_eq!(q.gene_symbol.as_deref(), Some("BRCA1"));
        assert!(!q.is_non_human());
    }

    #[test]
    fn gene_query_non_human() {
        let q = GeneQuery::non_human("KIT", "Felis catus");
        assert!(q.is_non_human());
        assert_eq!(q.animal.as_deref(), Some("Felis catus"));
    }

    #[test]
    fn gene_query_deserializes_extraction_shape() {
        let q: GeneQuery =
            serde_json::from_str(r#"{"animal": null, "geneSymbol": "STX17"}"#).unwrap();
        assert_eq!(q.gene_symbol.as_deref(), Some("STX17"));
        assert!(q.animal.is_none());

        // A symbol-less extraction may omit the animal field entirely.
        let q: GeneQuery = serde_json::from_str(r#"{"geneSymbol": null}"#).unwrap();
        assert!(q.gene_symbol.is_none());
    }

    #[test]
    fn gene_source_serializes_as_provider_name() {
        assert_eq!(serde_json::to_string(&GeneSource::Ncbi).unwrap(), "\"NCBI\"");
        assert_eq!(serde_json::to_string(&GeneSource::Hgnc).unwrap(), "\"HGNC\"");
        assert_eq!(GeneSource::Hgnc.to_string(), "HGNC");
    }

    #[test]
    fn gene_record_wire_shape() {
        let record = GeneRecord::new(
            GeneSource::Hgnc,
            "HGNC:1100",
            "BRCA1 DNA repair associated",
            "https://www.genenames.org/data/gene-symbol-report/#!/hgnc_id/HGNC:1100",
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source"], "HGNC");
        assert_eq!(json["geneId"], "HGNC:1100");
        assert!(json["geneLink"].as_str().unwrap().contains("genenames.org"));
    }
}
