//! Email syntax checks.
//!
//! Both functions use the same token shape: one or more of `[A-Za-z0-9._%+-]`,
//! an `@`, one or more of `[A-Za-z0-9.-]`, a dot and at least two letters.
//! [`is_valid_email`] requires the whole input to be that token, while
//! [`extract_emails`] finds every word-bounded occurrence inside free text.
//! Word boundaries are ASCII-only, so an accented letter next to a mention
//! separates it like punctuation does.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

static EMAIL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)")
        .expect("valid email token pattern")
});

/// Returns `true` when the whole candidate is a syntactically valid email.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL.is_match(candidate)
}

/// Extracts every email mentioned in `text`, left to right.
///
/// Duplicates are kept; callers decide how to merge them.
pub fn extract_emails(text: &str) -> Vec<&str> {
    EMAIL_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}
