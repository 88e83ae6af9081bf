use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use jobrank::config::Config;
use tempfile::TempDir;

pub const TEST_DIM: usize = 64;

/// Temp directory holding a job file, a resume and (after a run) a cache file.
pub struct Workspace {
    pub dir: TempDir,
    pub jobs_path: PathBuf,
    pub resume_path: PathBuf,
    pub cache_path: PathBuf,
}

impl Workspace {
    pub fn new(jobs_json: &str, resume: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let jobs_path = dir.path().join("jobs.json");
        let resume_path = dir.path().join("resume.txt");
        let cache_path = dir.path().join("cache").join("cache.json");

        fs::write(&jobs_path, jobs_json).expect("write jobs");
        fs::write(&resume_path, resume).expect("write resume");

        Self {
            dir,
            jobs_path,
            resume_path,
            cache_path,
        }
    }

    /// The two-job corpus from the documented end-to-end example.
    pub fn drupal_example() -> Self {
        Self::new(
            r#"[
                {"title": "Drupal Dev", "description": "drupal html css", "company": "Acme"},
                {"title": "Unrelated", "description": ""}
            ]"#,
            "drupal css project",
        )
    }

    pub fn config(&self) -> Config {
        Config {
            embedding_dim: TEST_DIM,
            jobs_path: self.jobs_path.clone(),
            resume_path: self.resume_path.clone(),
            cache_path: self.cache_path.clone(),
            report_dir: Some(self.dir.path().join("reports")),
            provider_timeout: Duration::from_secs(2),
            ..Config::default()
        }
    }

    pub fn cache_json(&self) -> serde_json::Value {
        let bytes = fs::read(&self.cache_path).expect("cache file exists");
        serde_json::from_slice(&bytes).expect("cache file is valid JSON")
    }
}
