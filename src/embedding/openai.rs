//! OpenAI-compatible embeddings client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;

use super::error::ProviderError;
use super::provider::VectorProvider;

/// Settings for [`OpenAiProvider`].
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Expected output length; also sent as `dimensions` to models that accept it.
    pub dimensions: usize,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Retries after the first attempt for 429, 5xx and transport errors.
    pub max_retries: usize,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl OpenAiConfig {
    /// Builds provider settings from the runtime config, if an API key is present.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            api_key,
            base_url: config.embedding_base_url.clone(),
            model: config.embedding_model.clone(),
            dimensions: config.embedding_dim,
            timeout: config.provider_timeout,
            max_retries: config.provider_max_retries,
        })
    }
}

/// Async embeddings client for OpenAI-compatible `/embeddings` endpoints.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: usize,
    max_retries: usize,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl OpenAiProvider {
    /// Builds the HTTP client with bearer auth and the configured timeout.
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::InvalidConfig {
                reason: "missing API key".to_string(),
            });
        }
        if config.model.trim().is_empty() {
            return Err(ProviderError::InvalidConfig {
                reason: "missing model name".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", config.api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).map_err(|e| ProviderError::InvalidConfig {
                reason: format!("invalid API key: {}", e),
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::InvalidConfig {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        let endpoint = format!("{}/embeddings", config.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            endpoint,
            model: config.model,
            dimensions: config.dimensions,
            max_retries: config.max_retries,
        })
    }

    /// Returns the full embeddings endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_dimensions(&self) -> Option<usize> {
        // Only the text-embedding-3 family accepts a `dimensions` parameter.
        self.model
            .starts_with("text-embedding-3")
            .then_some(self.dimensions)
    }

    async fn send_once(&self, text: &str) -> Result<Vec<f32>, Attempt> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: [text],
            dimensions: self.request_dimensions(),
        };

        let response = match self.client.post(&self.endpoint).json(&request).send().await {
            Ok(resp) => resp,
            Err(err) => {
                let retryable = is_retryable_error(&err);
                return Err(Attempt {
                    error: err.into(),
                    retryable,
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Attempt {
                error: ProviderError::Status {
                    status: status.as_u16(),
                    body,
                },
                retryable: should_retry(status),
            });
        }

        let parsed: EmbeddingResponse = response.json().await.map_err(|err| Attempt {
            error: ProviderError::InvalidResponse {
                reason: err.to_string(),
            },
            retryable: false,
        })?;

        parsed
            .data
            .into_iter()
            .min_by_key(|entry| entry.index)
            .map(|entry| entry.embedding)
            .ok_or_else(|| Attempt {
                error: ProviderError::InvalidResponse {
                    reason: "response contained no embeddings".to_string(),
                },
                retryable: false,
            })
    }
}

#[async_trait]
impl VectorProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut attempt = 0usize;
        loop {
            match self.send_once(text).await {
                Ok(vector) => {
                    debug!(model = %self.model, attempt, dim = vector.len(), "Embedding received");
                    return Ok(vector);
                }
                Err(failed) if failed.retryable && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff = retry_backoff(attempt);
                    warn!(
                        model = %self.model,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %failed.error,
                        "Retrying embedding request"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(failed) => return Err(failed.error),
            }
        }
    }
}

struct Attempt {
    error: ProviderError,
    retryable: bool,
}

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_body() || err.is_request()
}

fn retry_backoff(attempt: usize) -> Duration {
    let capped = attempt.min(5) as u32;
    Duration::from_millis(500 * (1 << capped))
}

/// Worst-case wall time of one retried `embed` call: every attempt hits the per-request
/// timeout and every retry sleeps its full backoff.
pub fn retry_budget(per_request: Duration, max_retries: usize) -> Duration {
    let attempts = u32::try_from(max_retries.saturating_add(1)).unwrap_or(u32::MAX);
    (1..=max_retries).fold(per_request.saturating_mul(attempts), |total, attempt| {
        total.saturating_add(retry_backoff(attempt))
    })
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
