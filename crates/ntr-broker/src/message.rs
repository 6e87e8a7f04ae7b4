//! Tagged request/response contract
//!
//! The wire shapes mirror the host's messaging transport: requests are
//! `{ "action": ..., "data": ... }`, responses are
//! `{ "status": "success", "details": ... }` or
//! `{ "status": "error", "message": ... }`.

use ntr_model::{GeneQuery, GeneRecord};
use serde::{Deserialize, Serialize};

/// Request routed to a gene lookup adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data")]
pub enum LookupRequest {
    /// Human gene lookup (HGNC path)
    #[serde(rename = "lookupHuman")]
    LookupHuman(GeneQuery),
    /// Non-human gene lookup (NCBI path)
    #[serde(rename = "lookupNonHuman")]
    LookupNonHuman(GeneQuery),
}

impl LookupRequest {
    /// Select the adapter path for a query: non-human when the query names
    /// an organism, human otherwise.
    #[inline]
    #[must_use]
    pub fn for_query(query: GeneQuery) -> Self {
        if query.is_non_human() {
            Self::LookupNonHuman(query)
        } else {
            Self::LookupHuman(query)
        }
    }

    /// Wire name of the action tag
    #[inline]
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::LookupHuman(_) => "lookupHuman",
            Self::LookupNonHuman(_) => "lookupNonHuman",
        }
    }
}

/// Result of a routed lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LookupResponse {
    /// The adapter resolved; `details: None` means "queried, not found"
    Success {
        /// Normalized record, or `None` for a valid empty result
        details: Option<GeneRecord>,
    },
    /// The adapter (or the dispatch itself) failed
    Error {
        /// Human-readable failure message
        message: String,
    },
}

impl LookupResponse {
    /// Create an error response
    #[inline]
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
