use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::cache::{CacheKey, EmbeddingCache};
use crate::constants::{
    DEFAULT_PROVIDER_TIMEOUT_SECS, DimValidationError, sentinel_vector, validate_embedding_dim,
};

use super::error::{ProviderError, ResumeEmbeddingError};
use super::provider::VectorProvider;

/// Where a resolved vector came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingSource {
    /// Served from the cache; no provider call.
    Cache,
    /// Fetched from the provider and written through to the cache.
    Provider,
    /// Text was empty after normalization; sentinel returned.
    EmptyText,
    /// Provider failed; sentinel returned.
    Fallback,
}

/// One resolved vector. Always has the resolver's dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub vector: Vec<f32>,
    pub source: EmbeddingSource,
}

impl Resolution {
    /// Returns `true` if the vector is the sentinel rather than a real embedding.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self.source,
            EmbeddingSource::EmptyText | EmbeddingSource::Fallback
        )
    }
}

/// A recovered per-item provider failure.
#[derive(Debug)]
pub struct EmbeddingFailure {
    /// Diagnostic label (e.g. a job title).
    pub label: String,
    /// Normalized text sent to the provider.
    pub text: String,
    pub error: ProviderError,
}

/// Counters for one resolver's lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolverStats {
    pub cache_hits: usize,
    pub provider_calls: usize,
    pub provider_failures: usize,
    pub empty_texts: usize,
}

/// Resolves texts to vectors through the cache, then the provider, then the sentinel.
///
/// Owns the cache; every write goes through `&mut self`, so there is exactly one writer.
pub struct EmbeddingResolver {
    provider: Arc<dyn VectorProvider>,
    cache: EmbeddingCache,
    dim: usize,
    timeout: Duration,
    stats: ResolverStats,
    failures: Vec<EmbeddingFailure>,
}

impl std::fmt::Debug for EmbeddingResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingResolver")
            .field("provider", &self.provider.name())
            .field("cache", &self.cache)
            .field("dim", &self.dim)
            .field("timeout", &self.timeout)
            .field("stats", &self.stats)
            .finish()
    }
}

impl EmbeddingResolver {
    /// Creates a resolver producing vectors of length `dim`.
    pub fn new(
        provider: Arc<dyn VectorProvider>,
        cache: EmbeddingCache,
        dim: usize,
    ) -> Result<Self, DimValidationError> {
        if dim == 0 {
            return Err(DimValidationError::ZeroDimension);
        }
        Ok(Self {
            provider,
            cache,
            dim,
            timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            stats: ResolverStats::default(),
            failures: Vec::new(),
        })
    }

    /// Sets the bound on one provider `embed` call, retries included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves `text`, never failing: provider errors yield the sentinel.
    ///
    /// `label` is only used in logs and failure records.
    pub async fn resolve(&mut self, text: &str, label: &str) -> Resolution {
        let key = CacheKey::from_text(text);
        if key.is_empty() {
            warn!(label, "Empty text, substituting sentinel vector");
            self.stats.empty_texts += 1;
            return Resolution {
                vector: sentinel_vector(self.dim),
                source: EmbeddingSource::EmptyText,
            };
        }

        match self.lookup_or_fetch(&key).await {
            Ok(resolution) => resolution,
            Err(error) => {
                warn!(
                    label,
                    text_len = key.as_str().len(),
                    provider = self.provider.name(),
                    error = %error,
                    "Embedding failed, substituting sentinel vector"
                );
                self.failures.push(EmbeddingFailure {
                    label: label.to_string(),
                    text: key.into_inner(),
                    error,
                });
                Resolution {
                    vector: sentinel_vector(self.dim),
                    source: EmbeddingSource::Fallback,
                }
            }
        }
    }

    /// Resolves the resume. Unlike [`resolve`](Self::resolve) this never falls back.
    pub async fn resolve_resume(&mut self, text: &str) -> Result<Vec<f32>, ResumeEmbeddingError> {
        let key = CacheKey::from_text(text);
        if key.is_empty() {
            return Err(ResumeEmbeddingError::EmptyResume);
        }

        self.lookup_or_fetch(&key)
            .await
            .map(|resolution| resolution.vector)
            .map_err(|source| ResumeEmbeddingError::Provider { source })
    }

    async fn lookup_or_fetch(&mut self, key: &CacheKey) -> Result<Resolution, ProviderError> {
        if let Some(cached) = self.cache.get(key) {
            match validate_embedding_dim(cached.len(), self.dim) {
                Ok(()) => {
                    self.stats.cache_hits += 1;
                    return Ok(Resolution {
                        vector: cached.to_vec(),
                        source: EmbeddingSource::Cache,
                    });
                }
                Err(e) => warn!(error = %e, "Ignoring cached vector with wrong dimension"),
            }
        }

        self.stats.provider_calls += 1;
        let vector = match self.fetch(key).await {
            Ok(vector) => vector,
            Err(e) => {
                self.stats.provider_failures += 1;
                return Err(e);
            }
        };

        if let Err(e) = self.cache.put(key.clone(), vector.clone()) {
            error!(error = %e, "Failed to persist embedding cache, keeping entry in memory");
        }

        Ok(Resolution {
            vector,
            source: EmbeddingSource::Provider,
        })
    }

    async fn fetch(&self, key: &CacheKey) -> Result<Vec<f32>, ProviderError> {
        let vector = tokio::time::timeout(self.timeout, self.provider.embed(key.as_str()))
            .await
            .map_err(|_| ProviderError::Timeout {
                timeout: self.timeout,
            })??;

        validate_embedding_dim(vector.len(), self.dim).map_err(|_| {
            ProviderError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            }
        })?;

        if vector.iter().any(|v| !v.is_finite()) {
            return Err(ProviderError::InvalidResponse {
                reason: "embedding contains non-finite values".to_string(),
            });
        }

        debug!(provider = self.provider.name(), dim = vector.len(), "Fetched embedding");
        Ok(vector)
    }

    /// Bound on one provider call, retries included.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Embedding dimension `D`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Failures recorded since the last [`take_failures`](Self::take_failures).
    #[inline]
    pub fn failures(&self) -> &[EmbeddingFailure] {
        &self.failures
    }

    pub fn take_failures(&mut self) -> Vec<EmbeddingFailure> {
        std::mem::take(&mut self.failures)
    }

    #[inline]
    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    pub fn into_cache(self) -> EmbeddingCache {
        self.cache
    }
}
