//! HGNC adapter (human genes)
//!
//! Single lookup against the genenames.org REST API. The API returns 404
//! for an unknown symbol, which is a normal empty result for us.

use crate::error::LookupError;
use ntr_model::{GeneRecord, GeneSource};
use reqwest::StatusCode;
use serde::Deserialize;

/// Default HGNC REST base URL
pub const DEFAULT_HGNC_BASE: &str = "https://rest.genenames.org";

#[derive(Debug, Deserialize)]
struct HgncEnvelope {
    #[serde(default)]
    response: HgncResponse,
}

#[derive(Debug, Default, Deserialize)]
struct HgncResponse {
    #[serde(default)]
    docs: Vec<HgncDoc>,
}

#[derive(Debug, Deserialize)]
struct HgncDoc {
    hgnc_id: String,
    name: String,
}

/// Normalize the first matching document into a gene record.
///
/// An empty document set means "queried, not found".
fn record_from_envelope(envelope: HgncEnvelope) -> Option<GeneRecord> {
    let doc = envelope.response.docs.into_iter().next()?;
    let link = format!(
        "https://www.genenames.org/data/gene-symbol-report/#!/hgnc_id/{}",
        doc.hgnc_id
    );
    Some(GeneRecord::new(GeneSource::Hgnc, doc.hgnc_id, doc.name, link))
}

/// REST adapter for the HGNC gene-symbol lookup endpoint
#[derive(Debug, Clone)]
pub struct HgncAdapter {
    http: reqwest::Client,
    base_url: String,
}

impl HgncAdapter {
    /// Create an adapter against the default endpoint
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_HGNC_BASE.to_string(),
        }
    }

    /// With base URL (for alternate deployments and tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up a human gene by symbol.
    ///
    /// # Errors
    /// `LookupError::Status` for any non-success status other than 404;
    /// 404 and an empty document set both return `Ok(None)`.
    pub async fn fetch_symbol(&self, symbol: &str) -> Result<Option<GeneRecord>, LookupError> {
        let url = format!(
            "{}/fetch/symbol/{symbol}",
            self.base_url.trim_end_matches('/')
        );
        tracing::debug!(%symbol, "querying HGNC");

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(%symbol, "no HGNC entry for symbol");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                provider: "HGNC",
                status: status.as_u16(),
            });
        }

        let envelope: HgncEnvelope = response.json().await?;
        let record = record_from_envelope(envelope);
        if record.is_none() {
            tracing::debug!(%symbol, "HGNC document set was empty");
        }
        Ok(record)
    }
}

impl Default for HgncAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(raw: &str) -> HgncEnvelope {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn first_document_becomes_record() {
        let env = envelope(
            r#"{
                "responseHeader": {"status": 0},
                "response": {
                    "numFound": 1,
                    "docs": [
                        {"hgnc_id": "HGNC:1100", "symbol": "BRCA1", "name": "BRCA1 DNA repair associated"},
                        {"hgnc_id": "HGNC:9999", "symbol": "OTHER", "name": "ignored"}
                    ]
                }
            }"#,
        );

        let record = record_from_envelope(env).unwrap();
        assert_eq!(record.source, GeneSource::Hgnc);
        assert_eq!(record.gene_id, "HGNC:1100");
        assert_eq!(record.gene_name, "BRCA1 DNA repair associated");
        assert!(record.gene_link.ends_with("hgnc_id/HGNC:1100"));
    }

    #[test]
    fn empty_document_set_is_not_found() {
        let env = envelope(r#"{"response": {"numFound": 0, "docs": []}}"#);
        assert!(record_from_envelope(env).is_none());
    }

    #[test]
    fn missing_response_block_is_not_found() {
        let env = envelope(r#"{"responseHeader": {"status": 0}}"#);
        assert!(record_from_envelope(env).is_none());
    }
}
