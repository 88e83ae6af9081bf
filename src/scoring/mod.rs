//! Cosine similarity and the stable descending ranking.

pub mod error;
pub mod ranker;
pub mod similarity;


pub use error::ScoringError;
pub use ranker::{Ranking, ScoredJob, rank};
pub use similarity::cosine_similarity;
