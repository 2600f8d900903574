//! Getting text into the engine.
//!
//! Extraction from uploaded files is a collaborator concern: the engine only
//! sees plain strings. `TextExtractor` is the seam; the built-in extractor
//! reads plain-text files and refuses everything else.
//!
//! `prepare` is the caller-side cleanup used before plagiarism checks. The
//! engine itself never applies it.

use crate::config::PlagiarismParams;
use crate::error::{GfResult, GradeForgeError};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> GfResult<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

const PLAIN_EXTENSIONS: &[&str] = &["txt", "text", "md"];

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> GfResult<String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !PLAIN_EXTENSIONS.contains(&ext.as_str()) {
            return Err(GradeForgeError::Extraction {
                path: path.display().to_string(),
                reason: format!("no extractor for '.{}' files", ext),
            });
        }

        let text = fs::read_to_string(path).map_err(|e| GradeForgeError::Extraction {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if text.trim().is_empty() {
            warn!("No text extracted from {}", path.display());
        }
        debug!("Extracted {} chars from {}", text.len(), path.display());
        Ok(text)
    }
}

/// Collapses whitespace runs and lower-cases.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn remove_boilerplate(text: &str, phrases: &[String]) -> String {
    phrases
        .iter()
        .fold(text.to_string(), |acc, phrase| acc.replace(phrase.as_str(), ""))
}

pub fn has_sufficient_content(text: &str, min_words: usize) -> bool {
    text.split_whitespace().count() > min_words
}

/// Normalises, strips boilerplate and filters out thin documents.
///
/// Returns the surviving texts with their positions in `texts`.
pub fn prepare<S: AsRef<str>>(texts: &[S], params: &PlagiarismParams) -> Vec<(usize, String)> {
    let phrases = params.boilerplate_phrases();
    texts
        .iter()
        .enumerate()
        .filter_map(|(i, t)| {
            let cleaned = remove_boilerplate(&normalize_text(t.as_ref()), &phrases);
            if has_sufficient_content(&cleaned, params.min_words) {
                Some((i, cleaned))
            } else {
                warn!(
                    "Skipping document {}: not enough meaningful content",
                    i + 1
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_and_strip() {
        let phrases = vec!["copyright".to_string()];
        let t = remove_boilerplate(&normalize_text("  Hello\n\tWORLD  Copyright "), &phrases);
        assert_eq!(t, "hello world ");
    }

    #[test]
    fn test_sufficient_content_is_strict() {
        assert!(!has_sufficient_content("a b c", 3));
        assert!(has_sufficient_content("a b c d", 3));
    }

    #[test]
    fn test_prepare_keeps_original_positions() {
        let params = PlagiarismParams {
            min_words: 2,
            ..Default::default()
        };
        let kept = prepare(&["one two three", "too short", "All Rights Reserved four five six"], &params);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].0, 0);
        assert_eq!(kept[1], (2, " four five six".to_string()));
    }
}
