//! Display text transforms for generated advice and summaries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Word budget for advice shown on the home screen.
pub const ADVICE_WORD_LIMIT: usize = 28;

static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(?:[-*•]|\d+[.)])\s+").expect("valid list marker regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[*_`#>~]+").expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Keeps the first `limit` words.
///
/// Text within the limit is returned unchanged. Longer text becomes its
/// first `limit` words joined by single spaces plus `...`.
pub fn truncate_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return text.to_string();
    }
    let mut truncated = words[..limit].join(" ");
    truncated.push_str("...");
    truncated
}

/// Flattens generated markdown into one plain line.
///
/// List markers and emphasis symbols are dropped and whitespace runs
/// (including newlines) collapse to single spaces.
pub fn clean_generated_text(text: &str) -> String {
    let without_markers = LIST_MARKER_RE.replace_all(text, " ");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_markers, "");
    WHITESPACE_RE
        .replace_all(&without_symbols, " ")
        .trim()
        .to_string()
}

/// Advice as shown to the user: cleaned, then cut to the word budget.
pub fn advice_for_display(text: &str) -> String {
    truncate_words(&clean_generated_text(text), ADVICE_WORD_LIMIT)
}
