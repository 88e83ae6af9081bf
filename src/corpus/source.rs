use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::error::{CorpusError, CorpusResult};
use super::record::JobRecord;

/// Supplies the jobs to rank and the resume to rank them against.
pub trait CorpusSource {
    fn jobs(&self) -> CorpusResult<Vec<JobRecord>>;

    fn resume(&self) -> CorpusResult<String>;
}

/// Reads jobs from a JSON array (or JSON Lines for `.jsonl`) and the resume from text.
#[derive(Debug, Clone)]
pub struct FileCorpus {
    jobs_path: PathBuf,
    resume_path: PathBuf,
}

impl FileCorpus {
    pub fn new(jobs_path: impl Into<PathBuf>, resume_path: impl Into<PathBuf>) -> Self {
        Self {
            jobs_path: jobs_path.into(),
            resume_path: resume_path.into(),
        }
    }

    pub fn jobs_path(&self) -> &Path {
        &self.jobs_path
    }

    pub fn resume_path(&self) -> &Path {
        &self.resume_path
    }

    fn is_json_lines(&self) -> bool {
        self.jobs_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"))
    }

    fn read(path: &Path) -> CorpusResult<String> {
        fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse_rows(&self, contents: &str) -> CorpusResult<Vec<Value>> {
        let path = &self.jobs_path;

        if self.is_json_lines() {
            return contents
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(idx, line)| {
                    serde_json::from_str(line).map_err(|source| CorpusError::Parse {
                        path: path.clone(),
                        line: Some(idx + 1),
                        source,
                    })
                })
                .collect();
        }

        let value: Value = serde_json::from_str(contents).map_err(|source| CorpusError::Parse {
            path: path.clone(),
            line: None,
            source,
        })?;

        match value {
            Value::Array(rows) => Ok(rows),
            _ => Err(CorpusError::NotAnArray { path: path.clone() }),
        }
    }
}

impl CorpusSource for FileCorpus {
    fn jobs(&self) -> CorpusResult<Vec<JobRecord>> {
        let contents = Self::read(&self.jobs_path)?;
        let rows = self.parse_rows(&contents)?;

        let jobs = rows
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                let invalid = |reason: String| CorpusError::InvalidRecord {
                    path: self.jobs_path.clone(),
                    row,
                    reason,
                };
                match value {
                    Value::Object(object) => JobRecord::from_json_object(row, object).map_err(invalid),
                    _ => Err(invalid("expected a JSON object".to_string())),
                }
            })
            .collect::<CorpusResult<Vec<_>>>()?;

        info!(
            path = %self.jobs_path.display(),
            jobs = jobs.len(),
            "Loaded job listings"
        );
        Ok(jobs)
    }

    fn resume(&self) -> CorpusResult<String> {
        let resume = Self::read(&self.resume_path)?;
        debug!(
            path = %self.resume_path.display(),
            chars = resume.chars().count(),
            "Loaded resume"
        );
        Ok(resume)
    }
}

/// Fixed jobs and resume held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    jobs: Vec<JobRecord>,
    resume: String,
}

impl InMemoryCorpus {
    pub fn new(jobs: Vec<JobRecord>, resume: impl Into<String>) -> Self {
        Self {
            jobs,
            resume: resume.into(),
        }
    }
}

impl CorpusSource for InMemoryCorpus {
    fn jobs(&self) -> CorpusResult<Vec<JobRecord>> {
        Ok(self.jobs.clone())
    }

    fn resume(&self) -> CorpusResult<String> {
        Ok(self.resume.clone())
    }
}
