//! Keyword-overlap rationales for recommended jobs.

mod categories;
mod generator;
mod keywords;

pub use categories::{CategoryError, CategoryMap};
pub use generator::{Explanation, ExplanationGenerator};
pub use keywords::{KeywordExtractor, TokenKeywordExtractor};
