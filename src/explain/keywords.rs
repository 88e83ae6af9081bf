use std::collections::{BTreeSet, HashSet};

/// Maps text to a set of keywords.
pub trait KeywordExtractor: Send + Sync {
    fn extract(&self, text: &str) -> BTreeSet<String>;
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "etc", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
    "how", "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "must", "my",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "out", "over", "own", "per", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "them", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "us", "very", "via", "was", "we", "well", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "within", "would",
    "you", "your", "yours",
    // Posting boilerplate.
    "ability", "candidate", "experience", "including", "job", "looking", "plus", "preferred",
    "required", "requirements", "responsibilities", "role", "skills", "strong", "using", "work",
    "working", "year", "years",
];

/// Token-based extractor: lowercase words minus stop words, plus known phrases.
///
/// Tokens split on anything that is not alphanumeric or one of `+`, `#`, `.`, so
/// `c++`, `c#` and `node.js` survive. Leading and trailing dots are trimmed. Single
/// characters and pure numbers are dropped.
#[derive(Debug, Clone)]
pub struct TokenKeywordExtractor {
    stop_words: HashSet<&'static str>,
    phrases: Vec<String>,
}

impl Default for TokenKeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenKeywordExtractor {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            phrases: Vec::new(),
        }
    }

    /// Also emits each multi-word `phrase` found on token boundaries.
    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let canonical = tokenize(phrase.as_ref()).join(" ");
            if canonical.contains(' ') && !self.phrases.contains(&canonical) {
                self.phrases.push(canonical);
            }
        }
        self
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() > 1
            && !token.chars().all(|c| c.is_ascii_digit() || c == '.')
            && !self.stop_words.contains(token)
    }
}

impl KeywordExtractor for TokenKeywordExtractor {
    fn extract(&self, text: &str) -> BTreeSet<String> {
        let tokens = tokenize(text);

        let mut keywords: BTreeSet<String> = tokens
            .iter()
            .filter(|t| self.keep(t))
            .cloned()
            .collect();

        if !self.phrases.is_empty() {
            let padded = format!(" {} ", tokens.join(" "));
            for phrase in &self.phrases {
                if padded.contains(&format!(" {} ", phrase)) {
                    keywords.insert(phrase.clone());
                }
            }
        }

        keywords
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|t| t.trim_matches('.'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_extract_lowercases_and_drops_stop_words() {
        let extractor = TokenKeywordExtractor::new();
        assert_eq!(
            extractor.extract("The Drupal developer and the CSS"),
            set(&["css", "developer", "drupal"])
        );
    }

    #[test]
    fn test_extract_keeps_symbolic_language_names() {
        let extractor = TokenKeywordExtractor::new();
        let keywords = extractor.extract("C++, C# and Node.js.");
        assert!(keywords.contains("c++"));
        assert!(keywords.contains("c#"));
        assert!(keywords.contains("node.js"));
    }

    #[test]
    fn test_extract_drops_numbers_and_single_chars() {
        let extractor = TokenKeywordExtractor::new();
        assert_eq!(extractor.extract("5 years of R and 3.5 x rust"), set(&["rust"]));
    }

    #[test]
    fn test_phrases_match_on_token_boundaries() {
        let extractor = TokenKeywordExtractor::new()
            .with_phrases(["Machine Learning", "project management", "single"]);

        let keywords = extractor.extract("Applied machine   learning; project-management");
        assert!(keywords.contains("machine learning"));
        assert!(keywords.contains("project management"));

        let none = extractor.extract("machinelearning");
        assert!(!none.contains("machine learning"));
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        assert!(TokenKeywordExtractor::new().extract("").is_empty());
    }
}
