//! Error types for gene lookups

/// Gene lookup failure
///
/// "Not found" is not represented here: adapters return `Ok(None)` for a
/// valid empty result, keeping it semantically distinct from transport
/// failures.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Request never produced a response, or the payload was undecodable
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with an unexpected non-success status
    #[error("{provider} request failed: HTTP {status}")]
    Status {
        /// Provider the request was sent to
        provider: &'static str,
        /// HTTP status code returned
        status: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_display() {
        let err = LookupError::Status {
            provider: "HGNC",
            status: 500,
        };
        assert!(err.to_string().contains("HGNC"));
        assert!(err.to_string().contains("500"));
    }
}
