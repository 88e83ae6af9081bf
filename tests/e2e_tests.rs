//! End-to-end runs over files on disk.

mod common;

use std::sync::Arc;

use jobrank::constants::GENERIC_MATCH_NARRATIVE;
use jobrank::corpus::FileCorpus;
use jobrank::embedding::{HashingProvider, MockProvider};
use jobrank::pipeline::{JobMatcher, MatchError};
use jobrank::report::{MarkdownReporter, Reporter};
use jobrank::{CacheError, ResumeEmbeddingError};

use common::fixtures::{TEST_DIM, Workspace};

#[tokio::test]
async fn test_drupal_example_ranks_and_explains() {
    let ws = Workspace::drupal_example();
    let config = ws.config();
    config.validate().expect("workspace config is valid");

    let provider = Arc::new(HashingProvider::new(TEST_DIM).unwrap());
    let mut matcher = JobMatcher::from_config(&config, provider).unwrap();
    let corpus = FileCorpus::new(&ws.jobs_path, &ws.resume_path);

    let report = matcher.run_corpus(&corpus).await.unwrap();

    let titles: Vec<&str> = report
        .recommendations
        .iter()
        .map(|r| r.job.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Drupal Dev", "Unrelated"]);

    let top = &report.recommendations[0];
    assert!(top.similarity > report.recommendations[1].similarity);
    assert!(top.explanation.matched_keywords.contains("drupal"));
    assert!(top.explanation.matched_keywords.contains("css"));
    assert!(
        !top.explanation.category_buckets["Technical Skills"].is_empty(),
        "Technical Skills bucket should be populated"
    );
    assert_eq!(top.job.company(), Some("Acme"));

    let bottom = &report.recommendations[1];
    assert_eq!(bottom.similarity, 0.0);
    assert_eq!(bottom.explanation.narrative, GENERIC_MATCH_NARRATIVE);
    assert_eq!(report.empty_texts, vec!["Unrelated".to_string()]);
}

#[tokio::test]
async fn test_cache_file_holds_only_normalized_non_empty_texts() {
    let ws = Workspace::drupal_example();
    let provider = Arc::new(HashingProvider::new(TEST_DIM).unwrap());
    let mut matcher = JobMatcher::from_config(&ws.config(), provider).unwrap();

    matcher
        .run_corpus(&FileCorpus::new(&ws.jobs_path, &ws.resume_path))
        .await
        .unwrap();

    let cache = ws.cache_json();
    let keys: Vec<&str> = cache
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["drupal css project", "drupal html css"]);
    assert_eq!(
        cache["drupal html css"].as_array().unwrap().len(),
        TEST_DIM
    );
}

#[tokio::test]
async fn test_second_run_is_served_from_cache() {
    let ws = Workspace::drupal_example();
    let corpus = FileCorpus::new(&ws.jobs_path, &ws.resume_path);

    let first_provider = Arc::new(MockProvider::new(TEST_DIM));
    let first = {
        let mut matcher = JobMatcher::from_config(&ws.config(), first_provider.clone()).unwrap();
        matcher.run_corpus(&corpus).await.unwrap()
    };
    assert_eq!(first_provider.call_count(), 2);

    let second_provider = Arc::new(MockProvider::failing(TEST_DIM));
    let mut matcher = JobMatcher::from_config(&ws.config(), second_provider.clone()).unwrap();
    let second = matcher.run_corpus(&corpus).await.unwrap();

    assert_eq!(second_provider.call_count(), 0);
    assert!(second.failures.is_empty());
    assert_eq!(second.stats.cache_hits, 2);

    let sims = |r: &jobrank::MatchReport| -> Vec<f32> {
        r.recommendations.iter().map(|rec| rec.similarity).collect()
    };
    assert_eq!(sims(&first), sims(&second));
}

#[tokio::test]
async fn test_resume_failure_propagates_and_spends_no_job_calls() {
    let ws = Workspace::drupal_example();
    let provider = Arc::new(MockProvider::failing(TEST_DIM));
    let mut matcher = JobMatcher::from_config(&ws.config(), provider.clone()).unwrap();

    let err = matcher
        .run_corpus(&FileCorpus::new(&ws.jobs_path, &ws.resume_path))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MatchError::Resume(ResumeEmbeddingError::Provider { .. })
    ));
    assert_eq!(provider.call_count(), 1);
    assert!(!ws.cache_path.exists());
}

#[tokio::test]
async fn test_provider_outage_on_jobs_still_completes() {
    let ws = Workspace::new(
        r#"[
            {"title": "A", "description": "rust services"},
            {"title": "B", "description": "python pipelines"},
            {"title": "C", "description": "go tooling"}
        ]"#,
        "rust developer",
    );
    let provider = Arc::new(
        MockProvider::new(TEST_DIM)
            .with_failure_for("rust services")
            .with_failure_for("go tooling"),
    );
    let mut matcher = JobMatcher::from_config(&ws.config(), provider).unwrap();

    let report = matcher
        .run_corpus(&FileCorpus::new(&ws.jobs_path, &ws.resume_path))
        .await
        .unwrap();

    assert_eq!(report.total_jobs, 3);
    assert_eq!(report.recommendations.len(), 3);
    let failed: Vec<&str> = report.failures.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(failed, vec!["A", "C"]);
    for rec in &report.recommendations {
        if rec.job.title != "B" {
            assert_eq!(rec.similarity, 0.0);
        }
    }
}

#[test]
fn test_corrupt_cache_is_fatal() {
    let ws = Workspace::drupal_example();
    std::fs::create_dir_all(ws.cache_path.parent().unwrap()).unwrap();
    std::fs::write(&ws.cache_path, b"[1, 2").unwrap();

    let provider = Arc::new(MockProvider::new(TEST_DIM));
    let err = JobMatcher::from_config(&ws.config(), provider).unwrap_err();

    assert!(matches!(err, MatchError::Cache(CacheError::Malformed { .. })));
}

#[tokio::test]
async fn test_markdown_report_written_to_configured_dir() {
    let ws = Workspace::drupal_example();
    let config = ws.config();
    let provider = Arc::new(HashingProvider::new(TEST_DIM).unwrap());
    let mut matcher = JobMatcher::from_config(&config, provider).unwrap();
    let report = matcher
        .run_corpus(&FileCorpus::new(&ws.jobs_path, &ws.resume_path))
        .await
        .unwrap();

    let dir = config.report_dir.clone().unwrap();
    MarkdownReporter::new(&dir).report(&report).unwrap();

    let entries: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("recommendations-") && name.ends_with(".md"));

    let contents = std::fs::read_to_string(&entries[0]).unwrap();
    assert!(contents.starts_with("# Job Recommendations ("));
    assert!(contents.contains("## Recommendation 1"));
    assert!(contents.contains("**Title:** Drupal Dev"));
}
