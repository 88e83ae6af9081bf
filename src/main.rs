//! Jobrank entrypoint.

use std::sync::Arc;

use mimalloc::MiMalloc;

use jobrank::cache::EmbeddingCache;
use jobrank::config::Config;
use jobrank::corpus::FileCorpus;
use jobrank::embedding::{HashingProvider, OpenAiConfig, OpenAiProvider, VectorProvider};
use jobrank::pipeline::JobMatcher;
use jobrank::report::{ConsoleReporter, MarkdownReporter, Reporter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        jobs = %config.jobs_path.display(),
        resume = %config.resume_path.display(),
        cache = %config.cache_path.display(),
        embedding_dim = config.embedding_dim,
        max_recommendations = config.max_recommendations,
        "Jobrank starting"
    );

    let mut matcher = match OpenAiConfig::from_config(&config) {
        Some(openai) => {
            let provider = OpenAiProvider::new(openai)?;
            tracing::info!(
                endpoint = provider.endpoint(),
                model = provider.name(),
                "Using OpenAI-compatible embedding provider"
            );
            JobMatcher::from_config(&config, Arc::new(provider))?
        }
        None => {
            // Hashing vectors must never be served to a later run with a real model.
            tracing::warn!(
                "No OPENAI_API_KEY configured, using offline hashing embeddings without the persistent cache"
            );
            let provider = HashingProvider::new(config.embedding_dim)?;
            JobMatcher::from_config_with_cache(
                &config,
                Arc::new(provider),
                EmbeddingCache::in_memory(),
            )?
        }
    };

    let corpus = FileCorpus::new(&config.jobs_path, &config.resume_path);
    let report = matcher.run_corpus(&corpus).await?;

    ConsoleReporter.report(&report)?;
    if let Some(dir) = &config.report_dir {
        MarkdownReporter::new(dir).report(&report)?;
    }

    if report.is_degraded() {
        tracing::warn!(
            failures = report.failures.len(),
            empty_texts = report.empty_texts.len(),
            "Some jobs were ranked with placeholder embeddings"
        );
    }

    let stats = report.stats;
    tracing::info!(
        total_jobs = report.total_jobs,
        cache_hits = stats.cache_hits,
        provider_calls = stats.provider_calls,
        provider_failures = stats.provider_failures,
        cache_entries = matcher.resolver().cache().len(),
        "Jobrank finished"
    );

    Ok(())
}
