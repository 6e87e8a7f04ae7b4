//! NCBI adapter (non-human genes)
//!
//! Two sequential E-utilities calls against the same provider:
//! 1. `esearch` resolves a symbol+organism term to an internal gene id;
//!    an empty id list short-circuits to "not found".
//! 2. `esummary` fetches the detail record for that id.

use crate::error::LookupError;
use ntr_model::{GeneRecord, GeneSource};
use serde::Deserialize;
use serde_json::Value;

/// Default E-utilities base URL
pub const DEFAULT_EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

#[derive(Debug, Deserialize)]
struct EsearchEnvelope {
    #[serde(default)]
    esearchresult: EsearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Extract the summary document for `gene_id` and normalize it.
///
/// The esummary payload keys each document by its own id, so navigation is
/// dynamic. A missing document or a document without a name is "not found".
fn record_from_summary(gene_id: &str, payload: &Value) -> Option<GeneRecord> {
    let name = payload
        .get("result")?
        .get(gene_id)?
        .get("name")?
        .as_str()?;
    let link = format!("https://www.ncbi.nlm.nih.gov/gene/{gene_id}");
    Some(GeneRecord::new(GeneSource::Ncbi, gene_id, name, link))
}

/// REST adapter for the NCBI Gene E-utilities endpoints
#[derive(Debug, Clone)]
pub struct NcbiAdapter {
    http: reqwest::Client,
    base_url: String,
}

impl NcbiAdapter {
    /// Create an adapter against the default endpoint
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_EUTILS_BASE.to_string(),
        }
    }

    /// With base URL (for alternate deployments and tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up a gene by symbol within a specific organism.
    ///
    /// # Errors
    /// `LookupError::Status` for any non-success status at either step.
    pub async fn fetch_gene(
        &self,
        symbol: &str,
        organism: &str,
    ) -> Result<Option<GeneRecord>, LookupError> {
        let term = format!("{symbol}[Gene Name] AND {organism}[Organism]");
        tracing::debug!(%symbol, %organism, "querying NCBI esearch");

        let search_url = format!("{}/esearch.fcgi", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&search_url)
            .query(&[("db", "gene"), ("term", term.as_str()), ("retmode", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                provider: "NCBI esearch",
                status: status.as_u16(),
            });
        }

        let search: EsearchEnvelope = response.json().await?;
        let Some(gene_id) = search.esearchresult.idlist.into_iter().next() else {
            tracing::debug!(%symbol, %organism, "no NCBI gene id found");
            return Ok(None);
        };

        tracing::debug!(%gene_id, "querying NCBI esummary");
        let summary_url = format!("{}/esummary.fcgi", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&summary_url)
            .query(&[("db", "gene"), ("id", gene_id.as_str()), ("retmode", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                provider: "NCBI esummary",
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(record_from_summary(&gene_id, &payload))
    }
}

impl Default for NcbiAdapter {
    fn default() -> Self {
        Self::new()
    }
}
