use async_trait::async_trait;

use super::error::ProviderError;

/// Maps text to a fixed-length embedding vector.
///
/// Implementations receive already-normalized text. Retries, if any, belong to the
/// implementation; callers treat every `Err` as final for that text.
#[async_trait]
pub trait VectorProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Embeds one text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}
