use thiserror::Error;

use crate::cache::CacheError;
use crate::constants::DimValidationError;
use crate::corpus::CorpusError;
use crate::embedding::ResumeEmbeddingError;
use crate::explain::CategoryError;
use crate::scoring::ScoringError;

/// Fatal failures of a match run. Per-job embedding failures are never raised here.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Categories(#[from] CategoryError),

    #[error("invalid embedding dimension: {0}")]
    Dimension(#[from] DimValidationError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Resume(#[from] ResumeEmbeddingError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

pub type MatchResult<T> = Result<T, MatchError>;
