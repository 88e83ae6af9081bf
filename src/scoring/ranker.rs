use tracing::debug;

use super::error::ScoringError;
use super::similarity::cosine_similarity;

/// Similarity of one job, addressed by its position in the input sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredJob {
    /// Index into the job sequence passed to [`rank`].
    pub index: usize,
    pub similarity: f32,
}

/// Jobs ordered by similarity, descending. Ties keep input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    entries: Vec<ScoredJob>,
}

impl Ranking {
    #[inline]
    pub fn entries(&self) -> &[ScoredJob] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first `k` entries, or all of them when fewer exist.
    pub fn top(&self, k: usize) -> Ranking {
        Ranking {
            entries: self.entries.iter().take(k).copied().collect(),
        }
    }
}

impl IntoIterator for Ranking {
    type Item = ScoredJob;
    type IntoIter = std::vec::IntoIter<ScoredJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Scores every job vector against `resume` and sorts descending by similarity.
///
/// The sort is stable, so equal similarities keep their input order. Every job vector
/// must have the resume's length.
pub fn rank(resume: &[f32], job_vecs: &[Vec<f32>]) -> Result<Ranking, ScoringError> {
    if resume.is_empty() {
        return Err(ScoringError::InvalidInput {
            reason: "resume vector is empty".to_string(),
        });
    }

    let mut entries = job_vecs
        .iter()
        .enumerate()
        .map(|(index, job)| {
            if job.len() != resume.len() {
                return Err(ScoringError::DimensionMismatch {
                    index,
                    expected: resume.len(),
                    actual: job.len(),
                });
            }
            Ok(ScoredJob {
                index,
                similarity: cosine_similarity(resume, job),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    entries.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    debug!(
        jobs = entries.len(),
        best = entries.first().map(|e| e.similarity),
        "Ranked jobs"
    );

    Ok(Ranking { entries })
}
