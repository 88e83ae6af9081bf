//! Console and Markdown output for a [`MatchReport`].
//!
//! Rendering lives in pure functions; the reporters only do I/O.

pub mod error;
mod render;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::pipeline::MatchReport;

pub use error::ReportError;
pub use render::{description_snippet, render_console, render_markdown, report_file_name};

/// Consumes a finished match report.
pub trait Reporter {
    fn report(&self, report: &MatchReport) -> Result<(), ReportError>;
}

/// Prints recommendations to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, report: &MatchReport) -> Result<(), ReportError> {
        let rendered = render_console(report);
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(rendered.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(ReportError::Console)
    }
}

/// Writes a timestamped Markdown file into a directory.
#[derive(Debug, Clone)]
pub struct MarkdownReporter {
    dir: PathBuf,
}

impl MarkdownReporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the report stamped with `generated_at` and returns the file path.
    pub fn write_at(
        &self,
        report: &MatchReport,
        generated_at: &DateTime<Local>,
    ) -> Result<PathBuf, ReportError> {
        let path = self.dir.join(report_file_name(generated_at));
        let write_err = |source| ReportError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;
        fs::write(&path, render_markdown(report, generated_at)).map_err(write_err)?;

        Ok(path)
    }
}

impl Reporter for MarkdownReporter {
    fn report(&self, report: &MatchReport) -> Result<(), ReportError> {
        let path = self.write_at(report, &Local::now())?;
        info!(path = %path.display(), "Recommendations written");
        Ok(())
    }
}
