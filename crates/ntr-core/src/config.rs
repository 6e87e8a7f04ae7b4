//! Analyzer configuration
//!
//! Endpoint and model knobs with production defaults. The config is also
//! the composition root for the REST-backed collaborators: it builds the
//! chat-client factory and the gene directory the broker owns.

use crate::pipeline::ChatClientFactory;
use ntr_llm::{ChatClient, OpenAiChatClient, DEFAULT_API_BASE, DEFAULT_MODEL};
use ntr_lookup::{HgncAdapter, NcbiAdapter, RestGeneDirectory, DEFAULT_EUTILS_BASE, DEFAULT_HGNC_BASE};
use std::sync::Arc;

/// Analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Model used for both extraction and final analysis
    pub model: String,
    /// Chat-completions API base URL
    pub api_base: String,
    /// HGNC REST base URL
    pub hgnc_base: String,
    /// NCBI E-utilities base URL
    pub eutils_base: String,
}

impl AnalyzerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With model name
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With chat API base URL
    #[inline]
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// With HGNC base URL
    #[inline]
    #[must_use]
    pub fn with_hgnc_base(mut self, base: impl Into<String>) -> Self {
        self.hgnc_base = base.into();
        self
    }

    /// With E-utilities base URL
    #[inline]
    #[must_use]
    pub fn with_eutils_base(mut self, base: impl Into<String>) -> Self {
        self.eutils_base = base.into();
        self
    }

    /// Build the chat-client factory for this configuration
    #[must_use]
    pub fn chat_factory(&self) -> OpenAiChatFactory {
        OpenAiChatFactory {
            model: self.model.clone(),
            api_base: self.api_base.clone(),
        }
    }

    /// Build the REST gene directory for this configuration
    #[must_use]
    pub fn gene_directory(&self) -> RestGeneDirectory {
        RestGeneDirectory::from_adapters(
            HgncAdapter::new().with_base_url(self.hgnc_base.clone()),
            NcbiAdapter::new().with_base_url(self.eutils_base.clone()),
        )
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            hgnc_base: DEFAULT_HGNC_BASE.to_string(),
            eutils_base: DEFAULT_EUTILS_BASE.to_string(),
        }
    }
}

/// Chat-client factory backed by the OpenAI-compatible REST client
#[derive(Debug, Clone)]
pub struct OpenAiChatFactory {
    model: String,
    api_base: String,
}

impl ChatClientFactory for OpenAiChatFactory {
    fn for_credential(&self, credential: &str) -> Arc<dyn ChatClient> {
        Arc::new(
            OpenAiChatClient::new(credential)
                .with_base_url(self.api_base.clone())
                .with_model(self.model.clone()),
        )
    }
}
