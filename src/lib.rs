//! Jobrank library crate (used by the binary and integration tests).
//!
//! Ranks job postings against a resume by embedding similarity, memoizing every
//! embedding in a persistent write-through cache.
//!
//! # Public API Surface
//!
//! ## Core
//! - [`normalize`] - Canonical text form, used as the cache key
//! - [`EmbeddingCache`], [`CacheKey`] - Persistent text → vector store
//! - [`EmbeddingResolver`] - Cache, then provider, then sentinel
//! - [`rank`], [`Ranking`], [`cosine_similarity`] - Stable descending ranking
//! - [`ExplanationGenerator`], [`CategoryMap`] - Keyword-overlap rationales
//!
//! ## Collaborators
//! - [`VectorProvider`] with [`OpenAiProvider`] and the offline [`HashingProvider`]
//! - [`CorpusSource`] with [`FileCorpus`] and [`InMemoryCorpus`]
//! - [`Reporter`] with [`ConsoleReporter`] and [`MarkdownReporter`]
//!
//! ## Orchestration
//! - [`JobMatcher`] runs the whole pipeline and returns a [`MatchReport`]
//! - [`Config`] loads settings from `JOBRANK_*` environment variables
//!
//! ## Test/Mock Support
//! [`MockProvider`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod explain;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod scoring;

pub use cache::{CacheError, CacheKey, CacheResult, EmbeddingCache};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, sentinel_vector, validate_embedding_dim};
pub use corpus::{CorpusError, CorpusSource, FileCorpus, InMemoryCorpus, JobRecord};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockProvider;
pub use embedding::{
    EmbeddingFailure, EmbeddingResolver, EmbeddingSource, HashingProvider, OpenAiConfig,
    OpenAiProvider, ProviderError, Resolution, ResolverStats, ResumeEmbeddingError,
    VectorProvider,
};
pub use explain::{
    CategoryError, CategoryMap, Explanation, ExplanationGenerator, KeywordExtractor,
    TokenKeywordExtractor,
};
pub use normalize::normalize;
pub use pipeline::{JobMatcher, MatchError, MatchReport, MatchResult, Recommendation};
pub use report::{ConsoleReporter, MarkdownReporter, ReportError, Reporter};
pub use scoring::{Ranking, ScoredJob, ScoringError, cosine_similarity, rank};
