//! Offline provider that feature-hashes tokens into a fixed-length vector.
//!
//! Output is a pure function of the text and `dim`, so vectors are stable across runs
//! and platforms. Quality is far below a learned model but keyword overlap still
//! produces positive cosine similarity.

use async_trait::async_trait;

use super::error::ProviderError;
use super::provider::VectorProvider;

/// Deterministic BLAKE3 feature-hashing provider.
#[derive(Debug, Clone)]
pub struct HashingProvider {
    dim: usize,
}

impl HashingProvider {
    pub fn new(dim: usize) -> Result<Self, ProviderError> {
        if dim == 0 {
            return Err(ProviderError::InvalidConfig {
                reason: "embedding dimension must be > 0".to_string(),
            });
        }
        Ok(Self { dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Computes the embedding synchronously.
    pub fn embed_sync(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut vector = vec![0.0f32; self.dim];
        let mut tokens = 0usize;

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            let hash = blake3::hash(token.as_bytes());
            let bytes = hash.as_bytes();

            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&bytes[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dim as u64) as usize;
            let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };

            vector[bucket] += sign;
            tokens += 1;
        }

        if tokens == 0 {
            return Err(ProviderError::InvalidResponse {
                reason: "text contains no hashable tokens".to_string(),
            });
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }

        Ok(vector)
    }
}

#[async_trait]
impl VectorProvider for HashingProvider {
    fn name(&self) -> &str {
        "hashing"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.embed_sync(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::cosine_similarity;

    #[test]
    fn test_zero_dim_rejected() {
        assert!(HashingProvider::new(0).is_err());
    }

    #[test]
    fn test_output_has_configured_length_and_unit_norm() {
        let provider = HashingProvider::new(64).unwrap();
        let v = provider.embed_sync("drupal html css").unwrap();

        assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_deterministic() {
        let provider = HashingProvider::new(128).unwrap();
        assert_eq!(
            provider.embed_sync("Senior Rust engineer").unwrap(),
            provider.embed_sync("Senior Rust engineer").unwrap()
        );
    }

    #[test]
    fn test_case_insensitive() {
        let provider = HashingProvider::new(128).unwrap();
        assert_eq!(
            provider.embed_sync("Drupal CSS").unwrap(),
            provider.embed_sync("drupal css").unwrap()
        );
    }

    #[test]
    fn test_shared_tokens_score_above_disjoint() {
        let provider = HashingProvider::new(1536).unwrap();
        let resume = provider.embed_sync("drupal css project").unwrap();
        let related = provider.embed_sync("drupal html css").unwrap();
        let unrelated = provider.embed_sync("forklift warehouse logistics").unwrap();

        assert!(
            cosine_similarity(&resume, &related) > cosine_similarity(&resume, &unrelated)
        );
    }

    #[test]
    fn test_no_tokens_is_an_error() {
        let provider = HashingProvider::new(16).unwrap();
        assert!(provider.embed_sync("!!! ---").is_err());
    }
}
