use std::collections::{BTreeMap, BTreeSet};

use crate::constants::GENERIC_MATCH_NARRATIVE;
use crate::normalize::normalize;

use super::categories::CategoryMap;
use super::keywords::{KeywordExtractor, TokenKeywordExtractor};

/// Why a job was recommended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    /// Keywords present in both resume and job text.
    pub matched_keywords: BTreeSet<String>,
    /// Matched keywords per category. Only non-empty categories appear.
    pub category_buckets: BTreeMap<String, Vec<String>>,
    /// Human-readable rationale. Never empty.
    pub narrative: String,
}

impl Explanation {
    /// Returns `true` when no keywords overlapped.
    pub fn is_generic(&self) -> bool {
        self.matched_keywords.is_empty()
    }

    /// One-line digest: overlap count and the categories it falls in.
    pub fn summary(&self) -> String {
        let count = self.matched_keywords.len();
        if count == 0 {
            return "No overlapping keywords.".to_string();
        }
        let noun = if count == 1 { "keyword" } else { "keywords" };
        if self.category_buckets.is_empty() {
            return format!("{} overlapping {}.", count, noun);
        }
        let categories: Vec<&str> = self.category_buckets.keys().map(String::as_str).collect();
        format!(
            "{} overlapping {} across {}.",
            count,
            noun,
            categories.join(", ")
        )
    }
}

/// Builds [`Explanation`]s from keyword overlap.
///
/// Output depends only on the two texts, the extractor and the category map.
#[derive(Debug, Clone)]
pub struct ExplanationGenerator<E = TokenKeywordExtractor> {
    extractor: E,
    categories: CategoryMap,
}

impl ExplanationGenerator<TokenKeywordExtractor> {
    /// Uses the token extractor, taught the map's multi-word terms.
    pub fn new(categories: CategoryMap) -> Self {
        let extractor = TokenKeywordExtractor::new().with_phrases(categories.phrases());
        Self {
            extractor,
            categories,
        }
    }
}

impl Default for ExplanationGenerator<TokenKeywordExtractor> {
    fn default() -> Self {
        Self::new(CategoryMap::default())
    }
}

impl<E: KeywordExtractor> ExplanationGenerator<E> {
    pub fn with_extractor(extractor: E, categories: CategoryMap) -> Self {
        Self {
            extractor,
            categories,
        }
    }

    pub fn categories(&self) -> &CategoryMap {
        &self.categories
    }

    /// Keywords of `text` after normalization.
    pub fn keywords(&self, text: &str) -> BTreeSet<String> {
        self.extractor.extract(&normalize(text))
    }

    /// Explains one job against one resume.
    pub fn explain(&self, resume_text: &str, job_text: &str) -> Explanation {
        let resume_keywords = self.keywords(resume_text);
        self.explain_against(&resume_keywords, job_text)
    }

    /// Like [`explain`](Self::explain) with the resume keywords already extracted.
    pub fn explain_against(
        &self,
        resume_keywords: &BTreeSet<String>,
        job_text: &str,
    ) -> Explanation {
        let job_keywords = self.keywords(job_text);
        let matched_keywords: BTreeSet<String> = resume_keywords
            .intersection(&job_keywords)
            .cloned()
            .collect();

        let mut category_buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for keyword in &matched_keywords {
            for category in self.categories.categories_for(keyword) {
                category_buckets
                    .entry(category.to_string())
                    .or_default()
                    .push(keyword.clone());
            }
        }

        let narrative = compose_narrative(&matched_keywords, &category_buckets);

        Explanation {
            matched_keywords,
            category_buckets,
            narrative,
        }
    }
}

fn compose_narrative(
    matched: &BTreeSet<String>,
    buckets: &BTreeMap<String, Vec<String>>,
) -> String {
    if matched.is_empty() {
        return GENERIC_MATCH_NARRATIVE.to_string();
    }

    let mut narrative = format!(
        "Overlapping keywords: {}.",
        matched.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    for (category, keywords) in buckets {
        narrative.push_str(&format!(" {}: {}.", category, keywords.join(", ")));
    }
    narrative
}
