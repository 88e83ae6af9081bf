use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the embedding cache.
pub enum CacheError {
    /// The cache file exists but could not be read.
    #[error("failed to read embedding cache at {path}: {source}")]
    Unreadable {
        /// Cache file path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cache file exists but is not a valid serialized mapping.
    #[error("embedding cache at {path} is malformed: {source}")]
    Malformed {
        /// Cache file path.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Flushing the mapping to storage failed.
    #[error("failed to persist embedding cache to {path}: {source}")]
    Persist {
        /// Cache file path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding the mapping failed.
    #[error("failed to encode embedding cache: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CacheError {
    /// Returns `true` for errors raised while loading persisted state.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Unreadable { .. } | Self::Malformed { .. })
    }
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
