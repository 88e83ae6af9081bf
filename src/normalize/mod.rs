//! Text normalization shared by the cache key and the provider request.
//!
//! [`normalize`] is pure and idempotent. Its output is the cache key, so any change to
//! these rules invalidates every persisted entry.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+").expect("email pattern is a valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// Cleans text for embedding and cache lookup.
///
/// Turns Unicode whitespace runs into one space, drops non-ASCII characters and
/// asterisks, strips email-shaped tokens, collapses whitespace again and trims both
/// ends. Characters are dropped before emails are matched so a removal can never
/// splice a new email together.
pub fn normalize(text: &str) -> String {
    let spaced = WHITESPACE_RUN.replace_all(text, " ");
    let ascii: String = spaced
        .chars()
        .filter(|c| c.is_ascii() && *c != '*')
        .collect();
    let without_emails = EMAIL_PATTERN.replace_all(&ascii, "");
    let collapsed = WHITESPACE_RUN.replace_all(&without_emails, " ");
    collapsed.trim().to_string()
}
