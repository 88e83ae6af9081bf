//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `JOBRANK_*` environment variables
//! (the provider key is read from the conventional `OPENAI_API_KEY`).

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_FILE, DEFAULT_EMBEDDING_BASE_URL, DEFAULT_EMBEDDING_DIM,
    DEFAULT_EMBEDDING_MODEL, DEFAULT_JOBS_PATH, DEFAULT_MAX_RECOMMENDATIONS,
    DEFAULT_PROVIDER_MAX_RETRIES, DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_RESUME_PATH,
};

/// Run configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `JOBRANK_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// Embedding dimension `D`. Default: `1536`.
    pub embedding_dim: usize,

    /// Number of ranked jobs kept for reporting. Default: `5`.
    pub max_recommendations: usize,

    /// Persisted embedding cache file. Default: `cache.json`.
    pub cache_path: PathBuf,

    /// Job listings file (JSON array, or JSON Lines with a `.jsonl` extension).
    pub jobs_path: PathBuf,

    /// Plain-text resume file.
    pub resume_path: PathBuf,

    /// Directory for Markdown reports. Unset disables the Markdown reporter.
    pub report_dir: Option<PathBuf>,

    /// JSON category map. Unset uses the built-in map.
    pub categories_path: Option<PathBuf>,

    /// Provider API key. Unset selects the offline hashing provider.
    pub api_key: Option<String>,

    /// Provider model name. Default: `text-embedding-ada-002`.
    pub embedding_model: String,

    /// Provider base URL (OpenAI-compatible). Default: `https://api.openai.com/v1`.
    pub embedding_base_url: String,

    /// Upper bound on a single provider call. Default: 30 seconds.
    pub provider_timeout: Duration,

    /// Client-side retries for throttled or failing provider responses. Default: `2`.
    pub provider_max_retries: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("embedding_dim", &self.embedding_dim)
            .field("max_recommendations", &self.max_recommendations)
            .field("cache_path", &self.cache_path)
            .field("jobs_path", &self.jobs_path)
            .field("resume_path", &self.resume_path)
            .field("report_dir", &self.report_dir)
            .field("categories_path", &self.categories_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("embedding_model", &self.embedding_model)
            .field("embedding_base_url", &self.embedding_base_url)
            .field("provider_timeout", &self.provider_timeout)
            .field("provider_max_retries", &self.provider_max_retries)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            jobs_path: PathBuf::from(DEFAULT_JOBS_PATH),
            resume_path: PathBuf::from(DEFAULT_RESUME_PATH),
            report_dir: None,
            categories_path: None,
            api_key: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_base_url: DEFAULT_EMBEDDING_BASE_URL.to_string(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            provider_max_retries: DEFAULT_PROVIDER_MAX_RETRIES,
        }
    }
}

impl Config {
    const ENV_EMBEDDING_VECTOR_SIZE: &'static str = "JOBRANK_EMBEDDING_VECTOR_SIZE";
    const ENV_MAX_RECOMMENDATIONS: &'static str = "JOBRANK_MAX_RECOMMENDATIONS";
    const ENV_CACHE_FILE: &'static str = "JOBRANK_CACHE_FILE";
    const ENV_JOBS_PATH: &'static str = "JOBRANK_JOBS_PATH";
    const ENV_RESUME_PATH: &'static str = "JOBRANK_RESUME_PATH";
    const ENV_REPORT_DIR: &'static str = "JOBRANK_REPORT_DIR";
    const ENV_CATEGORIES_PATH: &'static str = "JOBRANK_CATEGORIES_PATH";
    const ENV_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_EMBEDDING_MODEL: &'static str = "JOBRANK_EMBEDDING_MODEL";
    const ENV_EMBEDDING_URL: &'static str = "JOBRANK_EMBEDDING_URL";
    const ENV_PROVIDER_TIMEOUT_SECS: &'static str = "JOBRANK_PROVIDER_TIMEOUT_SECS";
    const ENV_PROVIDER_MAX_RETRIES: &'static str = "JOBRANK_PROVIDER_MAX_RETRIES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let embedding_dim = Self::parse_nonzero_from_env(
            Self::ENV_EMBEDDING_VECTOR_SIZE,
            defaults.embedding_dim as u64,
        )? as usize;
        let max_recommendations = Self::parse_u64_from_env(
            Self::ENV_MAX_RECOMMENDATIONS,
            defaults.max_recommendations as u64,
        )? as usize;
        let cache_path = Self::parse_path_from_env(Self::ENV_CACHE_FILE, defaults.cache_path);
        let jobs_path = Self::parse_path_from_env(Self::ENV_JOBS_PATH, defaults.jobs_path);
        let resume_path = Self::parse_path_from_env(Self::ENV_RESUME_PATH, defaults.resume_path);
        let report_dir = Self::parse_optional_path_from_env(Self::ENV_REPORT_DIR);
        let categories_path = Self::parse_optional_path_from_env(Self::ENV_CATEGORIES_PATH);
        let api_key = Self::parse_optional_string_from_env(Self::ENV_API_KEY);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let embedding_base_url =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_URL, defaults.embedding_base_url);
        let provider_timeout = Duration::from_secs(Self::parse_nonzero_from_env(
            Self::ENV_PROVIDER_TIMEOUT_SECS,
            defaults.provider_timeout.as_secs(),
        )?);
        let provider_max_retries = Self::parse_u64_from_env(
            Self::ENV_PROVIDER_MAX_RETRIES,
            defaults.provider_max_retries as u64,
        )? as usize;

        Ok(Self {
            embedding_dim,
            max_recommendations,
            cache_path,
            jobs_path,
            resume_path,
            report_dir,
            categories_path,
            api_key,
            embedding_model,
            embedding_base_url,
            provider_timeout,
            provider_max_retries,
        })
    }

    /// Validates paths and basic invariants (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_dim == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_EMBEDDING_VECTOR_SIZE,
            });
        }

        if self.provider_timeout.is_zero() {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_PROVIDER_TIMEOUT_SECS,
            });
        }

        Self::require_file(&self.jobs_path)?;
        Self::require_file(&self.resume_path)?;

        if let Some(ref path) = self.categories_path {
            Self::require_file(path)?;
        }

        if self.cache_path.exists() && !self.cache_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.cache_path.clone(),
            });
        }

        if let Some(ref dir) = self.report_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(ConfigError::NotADirectory { path: dir.clone() });
            }
        }

        Ok(())
    }

    fn require_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_nonzero_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        let value = Self::parse_u64_from_env(var_name, default)?;
        if value == 0 {
            return Err(ConfigError::ZeroValue { name: var_name });
        }
        Ok(value)
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_path_from_env(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }
}
