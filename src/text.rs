//! Tokenizers shared by the signal extractors.
//!
//! Each extractor deliberately uses a different view of the same text:
//! Jaccard and keyword matching compare raw whitespace tokens (case and
//! punctuation preserved), spelling counts `\w+` runs, TF-IDF uses
//! lower-cased terms of two or more word characters.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("static regex"));
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("static regex"));
static TERM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("static regex"));

/// Whitespace-split tokens, untouched.
pub fn whitespace_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn whitespace_token_set(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

/// Runs of word characters (letters, digits, underscore).
pub fn word_tokens(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Distinct whole-number tokens. Digits glued to letters ("x86") do not count.
pub fn number_tokens(text: &str) -> HashSet<&str> {
    NUMBER_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Lower-cased TF-IDF terms: word runs of at least two characters.
pub fn tfidf_terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Splits text into sentences.
///
/// A sentence ends at a run of `.`, `!` or `?` followed by whitespace (or the
/// end of input), or at a blank line. Fragments without any alphanumeric
/// character are dropped.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let boundary_end = if matches!(c, '.' | '!' | '?') {
            let mut end = idx + c.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if matches!(next, '.' | '!' | '?' | '"' | '\'' | ')') {
                    end = next_idx + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            match chars.peek() {
                None => Some(end),
                Some(&(_, next)) if next.is_whitespace() => Some(end),
                _ => None,
            }
        } else if c == '\n' {
            match chars.peek() {
                Some(&(_, '\n')) => Some(idx),
                _ => None,
            }
        } else {
            None
        };

        if let Some(end) = boundary_end {
            push_sentence(&mut out, &text[start..end]);
            start = end;
        }
    }
    push_sentence(&mut out, &text[start..]);
    out
}

fn push_sentence<'a>(out: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
        out.push(trimmed);
    }
}

/// Strips leading and trailing punctuation from a whitespace token.
pub fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}
