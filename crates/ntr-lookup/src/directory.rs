//! Directory seam over the two adapters
//!
//! The broker (and anything else on the privileged side) depends on this
//! trait rather than on the concrete adapters, so either side can be
//! replaced or tested independently.

use crate::error::LookupError;
use crate::hgnc::HgncAdapter;
use crate::ncbi::NcbiAdapter;
use async_trait::async_trait;
use ntr_model::GeneRecord;

/// Gene-database lookups, one method per provider path
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeneDirectory: Send + Sync {
    /// Look up a human gene by symbol (HGNC path)
    async fn lookup_human(&self, symbol: &str) -> Result<Option<GeneRecord>, LookupError>;

    /// Look up a gene in a non-human organism (NCBI path)
    async fn lookup_non_human(
        &self,
        symbol: &str,
        organism: &str,
    ) -> Result<Option<GeneRecord>, LookupError>;
}

/// Production directory backed by the two REST adapters
#[derive(Debug, Clone, Default)]
pub struct RestGeneDirectory {
    hgnc: HgncAdapter,
    ncbi: NcbiAdapter,
}

impl RestGeneDirectory {
    /// Create a directory against the default provider endpoints
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory from pre-configured adapters
    #[inline]
    #[must_use]
    pub fn from_adapters(hgnc: HgncAdapter, ncbi: NcbiAdapter) -> Self {
        Self { hgnc, ncbi }
    }
}

#[async_trait]
impl GeneDirectory for RestGeneDirectory {
    async fn lookup_human(&self, symbol: &str) -> Result<Option<GeneRecord>, LookupError> {
        self.hgnc.fetch_symbol(symbol).await
    }

    async fn lookup_non_human(
        &self,
        symbol: &str,
        organism: &str,
    ) -> Result<Option<GeneRecord>, LookupError> {
        self.ncbi.fetch_gene(symbol, organism).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntr_model::GeneSource;

    #[tokio::test]
    async fn directory_trait_is_object_safe() {
        let mut mock = MockGeneDirectory::new();
        mock.expect_lookup_human().returning(|symbol| {
            let record = GeneRecord::new(
                GeneSource::Hgnc,
                "HGNC:6342",
                format!("{symbol} proto-oncogene"),
                "https://www.genenames.org/data/gene-symbol-report/#!/hgnc_id/HGNC:6342",
            );
            Ok(Some(record))
        });

        let directory: Box<dyn GeneDirectory> = Box::new(mock);
        let record = directory.lookup_human("KIT").await.unwrap().unwrap();
        assert_eq!(record.gene_name, "KIT proto-oncogene");
    }
}
