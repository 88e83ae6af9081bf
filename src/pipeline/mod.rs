//! End-to-end match run: resume, jobs, ranking, explanations.

pub mod error;
mod matcher;


pub use error::{MatchError, MatchResult};
pub use matcher::{JobMatcher, MatchReport, Recommendation};
