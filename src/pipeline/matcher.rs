use std::sync::Arc;

use tracing::info;

use crate::cache::EmbeddingCache;
use crate::config::Config;
use crate::corpus::{CorpusSource, JobRecord};
use crate::embedding::openai::retry_budget;
use crate::embedding::{
    EmbeddingFailure, EmbeddingResolver, EmbeddingSource, ResolverStats, VectorProvider,
};
use crate::explain::{
    CategoryMap, Explanation, ExplanationGenerator, KeywordExtractor, TokenKeywordExtractor,
};
use crate::scoring::rank;

use super::error::MatchResult;

/// One recommended job.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub job: JobRecord,
    pub similarity: f32,
    pub explanation: Explanation,
}

/// Output of one [`JobMatcher::run`].
#[derive(Debug)]
pub struct MatchReport {
    /// Top-K jobs, best first.
    pub recommendations: Vec<Recommendation>,
    /// Jobs whose embedding failed and were ranked with the sentinel.
    pub failures: Vec<EmbeddingFailure>,
    /// Labels of jobs with an empty description.
    pub empty_texts: Vec<String>,
    /// Number of jobs ranked.
    pub total_jobs: usize,
    /// Resolver counters since the matcher was created.
    pub stats: ResolverStats,
}

impl MatchReport {
    /// Returns `true` if any job was ranked with a sentinel vector.
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty() || !self.empty_texts.is_empty()
    }
}

/// Resolves, ranks and explains jobs against a resume.
#[derive(Debug)]
pub struct JobMatcher<E = TokenKeywordExtractor> {
    resolver: EmbeddingResolver,
    explainer: ExplanationGenerator<E>,
    max_recommendations: usize,
}

impl JobMatcher<TokenKeywordExtractor> {
    /// Opens the cache and category map named by `config` and wires them to `provider`.
    pub fn from_config(config: &Config, provider: Arc<dyn VectorProvider>) -> MatchResult<Self> {
        let cache = EmbeddingCache::open(&config.cache_path)?;
        Self::from_config_with_cache(config, provider, cache)
    }

    /// Like [`from_config`](Self::from_config) with a caller-supplied cache.
    pub fn from_config_with_cache(
        config: &Config,
        provider: Arc<dyn VectorProvider>,
        cache: EmbeddingCache,
    ) -> MatchResult<Self> {
        let categories = match &config.categories_path {
            Some(path) => CategoryMap::from_json_file(path)?,
            None => CategoryMap::default(),
        };
        // The HTTP client applies `provider_timeout` per request; the outer bound has to
        // leave room for its retries.
        let call_budget = retry_budget(config.provider_timeout, config.provider_max_retries);
        let resolver = EmbeddingResolver::new(provider, cache, config.embedding_dim)?
            .with_timeout(call_budget);

        Ok(Self::new(
            resolver,
            ExplanationGenerator::new(categories),
            config.max_recommendations,
        ))
    }
}

impl<E: KeywordExtractor> JobMatcher<E> {
    pub fn new(
        resolver: EmbeddingResolver,
        explainer: ExplanationGenerator<E>,
        max_recommendations: usize,
    ) -> Self {
        Self {
            resolver,
            explainer,
            max_recommendations,
        }
    }

    /// Ranks `jobs` against `resume` and explains the top matches.
    ///
    /// The resume is resolved first; if that fails no job is sent to the provider.
    /// Job failures only degrade the affected job.
    pub async fn run(&mut self, resume: &str, jobs: Vec<JobRecord>) -> MatchResult<MatchReport> {
        info!(
            jobs = jobs.len(),
            max_recommendations = self.max_recommendations,
            "Starting match run"
        );

        let resume_vector = self.resolver.resolve_resume(resume).await?;

        let mut job_vectors = Vec::with_capacity(jobs.len());
        let mut empty_texts = Vec::new();
        for job in &jobs {
            let label = job.label();
            let resolution = self.resolver.resolve(&job.description, &label).await;
            if resolution.source == EmbeddingSource::EmptyText {
                empty_texts.push(label);
            }
            job_vectors.push(resolution.vector);
        }

        let ranking = rank(&resume_vector, &job_vectors)?;
        let resume_keywords = self.explainer.keywords(resume);

        let recommendations: Vec<Recommendation> = ranking
            .top(self.max_recommendations)
            .into_iter()
            .zip(1..)
            .filter_map(|(scored, position)| {
                let job = jobs.get(scored.index)?.clone();
                let explanation = self
                    .explainer
                    .explain_against(&resume_keywords, &job.description);
                Some(Recommendation {
                    rank: position,
                    job,
                    similarity: scored.similarity,
                    explanation,
                })
            })
            .collect();

        let failures = self.resolver.take_failures();
        let stats = self.resolver.stats();

        info!(
            total_jobs = jobs.len(),
            recommendations = recommendations.len(),
            failures = failures.len(),
            empty_texts = empty_texts.len(),
            cache_hits = stats.cache_hits,
            provider_calls = stats.provider_calls,
            "Match run complete"
        );

        Ok(MatchReport {
            recommendations,
            failures,
            empty_texts,
            total_jobs: jobs.len(),
            stats,
        })
    }

    /// Loads jobs and resume from `source`, then [`run`](Self::run)s.
    pub async fn run_corpus(&mut self, source: &dyn CorpusSource) -> MatchResult<MatchReport> {
        let jobs = source.jobs()?;
        let resume = source.resume()?;
        self.run(&resume, jobs).await
    }

    pub fn resolver(&self) -> &EmbeddingResolver {
        &self.resolver
    }

    pub fn into_resolver(self) -> EmbeddingResolver {
        self.resolver
    }
}
