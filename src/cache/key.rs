use std::borrow::Borrow;
use std::fmt;

use crate::normalize::normalize;

/// Cache key: the normalized form of some input text.
///
/// Only constructible through [`normalize`], so two raw strings that normalize
/// identically always address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Normalizes `text` into a key.
    pub fn from_text(text: &str) -> Self {
        Self(normalize(text))
    }

    /// Returns the normalized text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the normalized text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the key and returns the normalized text.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
