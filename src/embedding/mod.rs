//! Vector providers and the cache-backed embedding resolver.
//!
//! - [`VectorProvider`] is the seam to whatever computes embeddings.
//! - [`OpenAiProvider`] talks to an OpenAI-compatible endpoint.
//! - [`HashingProvider`] is an offline deterministic fallback.
//! - [`EmbeddingResolver`] routes each text through the cache, then the provider, and
//!   substitutes the sentinel vector when neither yields one.

mod error;
/// Offline feature-hashing provider.
pub mod hashing;
#[cfg(any(test, feature = "mock"))]
/// Scriptable provider for tests.
pub mod mock;
/// OpenAI-compatible HTTP provider.
pub mod openai;
mod provider;
mod resolver;


pub use error::{ProviderError, ResumeEmbeddingError};
pub use hashing::HashingProvider;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::VectorProvider;
pub use resolver::{
    EmbeddingFailure, EmbeddingResolver, EmbeddingSource, Resolution, ResolverStats,
};
