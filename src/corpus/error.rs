use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}{}: {source}", at_line(.line))]
    Parse {
        path: PathBuf,
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} must contain a JSON array of job objects")]
    NotAnArray { path: PathBuf },

    #[error("job record {row} in {path} is invalid: {reason}")]
    InvalidRecord {
        path: PathBuf,
        row: usize,
        reason: String,
    },
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

pub type CorpusResult<T> = Result<T, CorpusError>;
