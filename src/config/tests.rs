use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_jobrank_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("JOBRANK_EMBEDDING_VECTOR_SIZE");
        env::remove_var("JOBRANK_MAX_RECOMMENDATIONS");
        env::remove_var("JOBRANK_CACHE_FILE");
        env::remove_var("JOBRANK_JOBS_PATH");
        env::remove_var("JOBRANK_RESUME_PATH");
        env::remove_var("JOBRANK_REPORT_DIR");
        env::remove_var("JOBRANK_CATEGORIES_PATH");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("JOBRANK_EMBEDDING_MODEL");
        env::remove_var("JOBRANK_EMBEDDING_URL");
        env::remove_var("JOBRANK_PROVIDER_TIMEOUT_SECS");
        env::remove_var("JOBRANK_PROVIDER_MAX_RETRIES");
    }
}

fn sample_data_config() -> Config {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    Config {
        jobs_path: manifest_dir.join("data").join("job_listings.json"),
        resume_path: manifest_dir.join("data").join("resume.txt"),
        ..Default::default()
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.embedding_dim, 1536);
    assert_eq!(config.max_recommendations, 5);
    assert_eq!(config.cache_path, PathBuf::from("cache.json"));
    assert_eq!(config.jobs_path, PathBuf::from("data/job_listings.json"));
    assert_eq!(config.resume_path, PathBuf::from("data/resume.txt"));
    assert!(config.report_dir.is_none());
    assert!(config.categories_path.is_none());
    assert!(config.api_key.is_none());
    assert_eq!(config.embedding_model, "text-embedding-ada-002");
    assert_eq!(config.provider_timeout, Duration::from_secs(30));
    assert_eq!(config.provider_max_retries, 2);
}

#[test]
fn test_debug_redacts_api_key() {
    let config = Config {
        api_key: Some("sk-very-secret".to_string()),
        ..Default::default()
    };

    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("sk-very-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_jobrank_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.embedding_dim, 1536);
    assert_eq!(config.max_recommendations, 5);
    assert_eq!(config.cache_path, PathBuf::from("cache.json"));
}

#[test]
#[serial]
fn test_from_env_custom_sizes() {
    clear_jobrank_env();

    with_env_vars(
        &[
            ("JOBRANK_EMBEDDING_VECTOR_SIZE", "768"),
            ("JOBRANK_MAX_RECOMMENDATIONS", "10"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.embedding_dim, 768);
            assert_eq!(config.max_recommendations, 10);
        },
    );
}

#[test]
#[serial]
fn test_from_env_zero_recommendations_is_allowed() {
    clear_jobrank_env();

    with_env_vars(&[("JOBRANK_MAX_RECOMMENDATIONS", "0")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.max_recommendations, 0);
    });
}

#[test]
#[serial]
fn test_from_env_zero_vector_size_rejected() {
    clear_jobrank_env();

    with_env_vars(&[("JOBRANK_EMBEDDING_VECTOR_SIZE", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroValue { .. }));
        assert!(err.to_string().contains("JOBRANK_EMBEDDING_VECTOR_SIZE"));
    });
}

#[test]
#[serial]
fn test_from_env_invalid_number() {
    clear_jobrank_env();

    with_env_vars(&[("JOBRANK_MAX_RECOMMENDATIONS", "five")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
        assert!(err.to_string().contains("five"));
    });
}

#[test]
#[serial]
fn test_from_env_custom_paths() {
    clear_jobrank_env();

    with_env_vars(
        &[
            ("JOBRANK_CACHE_FILE", "/var/cache/jobrank/embeddings.json"),
            ("JOBRANK_JOBS_PATH", "/data/jobs.jsonl"),
            ("JOBRANK_RESUME_PATH", "/data/me.txt"),
            ("JOBRANK_REPORT_DIR", "/data/reports"),
            ("JOBRANK_CATEGORIES_PATH", "/data/categories.json"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert_eq!(
                config.cache_path,
                PathBuf::from("/var/cache/jobrank/embeddings.json")
            );
            assert_eq!(config.jobs_path, PathBuf::from("/data/jobs.jsonl"));
            assert_eq!(config.resume_path, PathBuf::from("/data/me.txt"));
            assert_eq!(config.report_dir, Some(PathBuf::from("/data/reports")));
            assert_eq!(
                config.categories_path,
                Some(PathBuf::from("/data/categories.json"))
            );
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_optional_values_are_unset() {
    clear_jobrank_env();

    with_env_vars(
        &[("OPENAI_API_KEY", "   "), ("JOBRANK_REPORT_DIR", "")],
        || {
            let config = Config::from_env().expect("should parse");
            assert!(config.api_key.is_none());
            assert!(config.report_dir.is_none());
        },
    );
}

#[test]
#[serial]
fn test_from_env_provider_settings() {
    clear_jobrank_env();

    with_env_vars(
        &[
            ("OPENAI_API_KEY", "sk-test"),
            ("JOBRANK_EMBEDDING_MODEL", "text-embedding-3-small"),
            ("JOBRANK_EMBEDDING_URL", "http://localhost:8089/v1"),
            ("JOBRANK_PROVIDER_TIMEOUT_SECS", "5"),
            ("JOBRANK_PROVIDER_MAX_RETRIES", "0"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.api_key.as_deref(), Some("sk-test"));
            assert_eq!(config.embedding_model, "text-embedding-3-small");
            assert_eq!(config.embedding_base_url, "http://localhost:8089/v1");
            assert_eq!(config.provider_timeout, Duration::from_secs(5));
            assert_eq!(config.provider_max_retries, 0);
        },
    );
}

#[test]
#[serial]
fn test_from_env_zero_timeout_rejected() {
    clear_jobrank_env();

    with_env_vars(&[("JOBRANK_PROVIDER_TIMEOUT_SECS", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::ZeroValue { .. }));
    });
}

#[test]
fn test_validate_success_with_sample_data() {
    let config = sample_data_config();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_missing_jobs_file() {
    let config = Config {
        jobs_path: PathBuf::from("/nonexistent/jobs.json"),
        ..sample_data_config()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
}

#[test]
fn test_validate_resume_path_is_directory() {
    let config = Config {
        resume_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"),
        ..sample_data_config()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotAFile { .. }));
}

#[test]
fn test_validate_cache_path_is_directory() {
    let config = Config {
        cache_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"),
        ..sample_data_config()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotAFile { .. }));
}

#[test]
fn test_validate_report_dir_is_file() {
    let config = Config {
        report_dir: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")),
        ..sample_data_config()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotADirectory { .. }));
}

#[test]
fn test_validate_missing_categories_file() {
    let config = Config {
        categories_path: Some(PathBuf::from("/nonexistent/categories.json")),
        ..sample_data_config()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::ZeroValue {
        name: "JOBRANK_EMBEDDING_VECTOR_SIZE",
    };
    assert!(err.to_string().contains("JOBRANK_EMBEDDING_VECTOR_SIZE"));
    assert!(err.to_string().contains("greater than zero"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));
}
