use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("failed to read category map at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid category map at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

const TECHNICAL_SKILLS: &[&str] = &[
    "python", "java", "javascript", "typescript", "rust", "go", "c++", "c#", "php", "ruby",
    "sql", "html", "css", "sass", "drupal", "wordpress", "react", "angular", "vue", "node.js",
    "django", "flask", "spring", "graphql", "rest", "api", "etl", "linux", "git", "testing",
    "machine learning", "data analysis", "data modeling", "web development",
];

const TOOLS_AND_PLATFORMS: &[&str] = &[
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins", "jira", "confluence",
    "figma", "salesforce", "tableau", "excel", "spark", "kafka", "airflow", "snowflake",
    "postgresql", "mysql", "mongodb", "redis", "github", "gitlab", "acquia", "pantheon",
];

const SOFT_SKILLS: &[&str] = &[
    "communication", "leadership", "teamwork", "collaboration", "mentoring", "organization",
    "presentation", "problem solving", "project management", "stakeholder management",
    "time management", "attention to detail",
];

const DOMAIN_KNOWLEDGE: &[&str] = &[
    "accessibility", "seo", "analytics", "ecommerce", "finance", "healthcare", "security",
    "compliance", "marketing", "agile", "scrum", "ux", "content", "research", "education",
    "government", "nonprofit",
];

/// Closed vocabularies used to bucket matched keywords, keyed by category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap {
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl Default for CategoryMap {
    /// Built-in map with technical, tooling, soft and domain vocabularies.
    fn default() -> Self {
        Self::new([
            ("Technical Skills", TECHNICAL_SKILLS),
            ("Tools & Platforms", TOOLS_AND_PLATFORMS),
            ("Soft Skills", SOFT_SKILLS),
            ("Domain Knowledge", DOMAIN_KNOWLEDGE),
        ])
    }
}

impl CategoryMap {
    /// Builds a map; terms are lowercased and trimmed, blanks dropped.
    pub fn new<I, C, T, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (C, T)>,
        C: Into<String>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let categories = categories
            .into_iter()
            .map(|(name, terms)| {
                let terms = terms
                    .into_iter()
                    .map(|t| t.as_ref().trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect();
                (name.into(), terms)
            })
            .collect();
        Self { categories }
    }

    /// Parses `{"Category": ["term", ...], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::new(raw))
    }

    /// Loads a JSON category map from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, CategoryError> {
        let json = fs::read_to_string(path).map_err(|source| CategoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::from_json_str(&json).map_err(|source| CategoryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            categories = map.len(),
            "Loaded category map"
        );
        Ok(map)
    }

    /// Categories containing `term`, in name order.
    pub fn categories_for<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories
            .iter()
            .filter(move |(_, terms)| terms.contains(term))
            .map(|(name, _)| name.as_str())
    }

    /// Every multi-word term across all categories.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.categories
            .values()
            .flatten()
            .filter(|t| t.contains(' '))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
