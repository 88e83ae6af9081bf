//! Scriptable provider for tests: counts calls, fails on demand, can stall.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::error::ProviderError;
use super::hashing::HashingProvider;
use super::provider::VectorProvider;

/// In-memory [`VectorProvider`] that records every request.
///
/// Unscripted texts get a [`HashingProvider`] vector, so similar texts still score as
/// similar.
pub struct MockProvider {
    dim: usize,
    fail_all: bool,
    fail_for: HashSet<String>,
    responses: HashMap<String, Vec<f32>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Succeeds for every text.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            fail_all: false,
            fail_for: HashSet::new(),
            responses: HashMap::new(),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails for every text.
    pub fn failing(dim: usize) -> Self {
        Self {
            fail_all: true,
            ..Self::new(dim)
        }
    }

    /// Returns `vector` verbatim for `text` (matched after normalization by the caller).
    pub fn with_response(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.responses.insert(text.to_string(), vector);
        self
    }

    /// Fails only for `text`.
    pub fn with_failure_for(mut self, text: &str) -> Self {
        self.fail_for.insert(text.to_string());
        self
    }

    /// Sleeps before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total number of `embed` calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Every requested text, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of calls made for `text`.
    pub fn calls_for(&self, text: &str) -> usize {
        self.calls.lock().iter().filter(|t| *t == text).count()
    }

    fn default_vector(&self, text: &str) -> Vec<f32> {
        HashingProvider::new(self.dim)
            .and_then(|p| p.embed_sync(text))
            .unwrap_or_else(|_| vec![1.0; self.dim])
    }
}

#[async_trait]
impl VectorProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.calls.lock().push(text.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_all || self.fail_for.contains(text) {
            return Err(ProviderError::Request {
                reason: format!("mock failure for {:?}", text),
            });
        }

        Ok(self
            .responses
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default_vector(text)))
    }
}
