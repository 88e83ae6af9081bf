//! Cross-cutting, shared constants.
//!
//! # Dimension Invariant
//!
//! Every vector that reaches [`crate::scoring`] has exactly the configured dimension `D`.
//! Real embeddings are checked with [`validate_embedding_dim`] where they enter the system
//! (provider output, cache reads); everything else is a [`sentinel_vector`] of length `D`.

pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

pub const DEFAULT_CACHE_FILE: &str = "cache.json";

pub const DEFAULT_JOBS_PATH: &str = "data/job_listings.json";

pub const DEFAULT_RESUME_PATH: &str = "data/resume.txt";

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

pub const DEFAULT_EMBEDDING_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_PROVIDER_MAX_RETRIES: usize = 2;

/// Characters of a job description shown by reporters.
pub const DESCRIPTION_SNIPPET_CHARS: usize = 200;

/// Rationale used when resume and job share no keywords.
pub const GENERIC_MATCH_NARRATIVE: &str =
    "Recommended as a general match based on overall similarity.";

/// All-zero placeholder substituted when a real embedding cannot be obtained.
#[inline]
pub fn sentinel_vector(dim: usize) -> Vec<f32> {
    vec![0.0; dim]
}

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a vector length matches the configured embedding dimension.
///
/// # Example
///
/// ```
/// use jobrank::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// let provider_output = vec![0.25_f32; 1536];
/// validate_embedding_dim(provider_output.len(), DEFAULT_EMBEDDING_DIM).unwrap();
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
