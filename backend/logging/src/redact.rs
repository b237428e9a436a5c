//! Log Redaction Layer
//!
//! Scrubs phone numbers, e-mail addresses and government ID numbers from
//! document text before it reaches the logs.

use regex::Regex;
use std::sync::LazyLock;

static TIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}-\d{3}-\d{3}(?:-\d{3,5})?\b").unwrap());
static SSS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{2}-\d{7}-\d\b").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap());
static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    // ID numbers first; the phone pattern would otherwise eat parts of them.
    let redacted = TIN_RE.replace_all(input, "[REDACTED_ID]");
    let redacted = SSS_RE.replace_all(&redacted, "[REDACTED_ID]");
    let redacted = EMAIL_RE.replace_all(&redacted, "[REDACTED_EMAIL]");
    TELEPHONE_RE
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .into_owned()
}

/// First `max_chars` characters of `input`, single-lined and redacted.
pub fn redacted_preview(input: &str, max_chars: usize) -> String {
    let flat: String = input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect();
    redact_sensitive_data(&flat)
}
