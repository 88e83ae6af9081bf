use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a [`VectorProvider`](super::VectorProvider).
pub enum ProviderError {
    #[error("embedding request failed: {reason}")]
    Request { reason: String },

    #[error("embedding provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid embedding response: {reason}")]
    InvalidResponse { reason: String },

    #[error("embedding request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid provider configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::InvalidResponse {
                reason: err.to_string(),
            }
        } else {
            ProviderError::Request {
                reason: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Error)]
/// Fatal failure to obtain a resume vector.
pub enum ResumeEmbeddingError {
    /// The resume normalizes to an empty string.
    #[error("resume text is empty after normalization")]
    EmptyResume,

    /// The provider failed and no cached vector exists.
    #[error("failed to embed resume: {source}")]
    Provider {
        #[source]
        source: ProviderError,
    },
}
