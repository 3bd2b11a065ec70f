//! Whitespace normalization for concatenated candidate text.
//!
//! Runs after paragraph concatenation so deliberate paragraph breaks
//! survive while incidental whitespace (multi-space runs, stray newlines
//! inside a paragraph) collapses to single spaces.

use regex::Regex;
use std::sync::LazyLock;

/// Marker appended after each selected paragraph before normalization.
pub const PARAGRAPH_BREAK: &str = "\n\n";

static PARAGRAPH_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs within paragraphs and paragraph-break runs
/// between them, producing trimmed text with exactly one blank line between
/// paragraphs.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let paragraphs: Vec<String> = PARAGRAPH_SPLIT
        .split(text)
        .map(|paragraph| {
            WHITESPACE_RUN
                .replace_all(paragraph.trim(), " ")
                .into_owned()
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect();

    paragraphs.join(PARAGRAPH_BREAK)
}
