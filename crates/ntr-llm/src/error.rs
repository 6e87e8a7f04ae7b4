//! Error types for chat completions

/// Chat-completion failure
///
/// No variant is retried; the pipeline maps these into its own taxonomy at
/// the stage that issued the call.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Request never produced a response
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("chat completion failed: HTTP {status}")]
    Status {
        /// HTTP status code returned by the endpoint
        status: u16,
    },

    /// Response carried no assistant message content
    #[error("chat completion contained no message content")]
    MissingContent,

    /// Assistant content was not valid JSON despite JSON mode
    #[error("model output was not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
