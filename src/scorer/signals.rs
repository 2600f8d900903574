//! The nine signal extractors.
//!
//! Every extractor is a pure function of its inputs and returns a score in
//! [0, 1]. Empty input is not an error: each signal has a fixed fallback
//! value for it.

use super::tfidf::{top_terms, TfIdfMatrix};
use crate::error::GfResult;
use crate::nlp::embedding::cosine;
use crate::nlp::{Embedder, EntityRecognizer, Lexicon, SentenceAnalyzer};
use crate::text;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

fn is_blank(doc: &str) -> bool {
    doc.trim().is_empty()
}

/// Cosine similarity of TF-IDF vectors fitted on just these two documents.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    if is_blank(a) || is_blank(b) {
        return 0.0;
    }
    let m = TfIdfMatrix::fit_transform(&[a, b]);
    if m.is_empty() {
        return 0.0;
    }
    m.cosine(0, 1)
}

/// Intersection over union of whitespace token sets.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let set_a = text::whitespace_token_set(a);
    let set_b = text::whitespace_token_set(b);
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// One minus the character edit distance over the longer length.
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let longest = a.chars().count().max(b.chars().count());
    (1.0 - strsim::levenshtein(a, b) as f64 / longest as f64).clamp(0.0, 1.0)
}

pub fn embedding_similarity(embedder: &dyn Embedder, a: &str, b: &str) -> GfResult<f64> {
    if is_blank(a) || is_blank(b) {
        return Ok(0.0);
    }
    let ea = embedder.embed(a)?;
    let eb = embedder.embed(b)?;
    Ok(cosine(&ea, &eb).clamp(0.0, 1.0))
}

/// Salient terms of the key: its top TF-IDF terms plus every named entity.
pub fn extract_keywords(
    key: &str,
    limit: usize,
    recognizer: &dyn EntityRecognizer,
) -> BTreeSet<String> {
    let mut keywords: BTreeSet<String> = top_terms(key, limit).into_iter().collect();
    keywords.extend(recognizer.entities(key).into_iter().map(|e| e.text));
    keywords
}

/// Fraction of key keywords found as whole whitespace tokens in the student
/// text. Matching is case-sensitive.
///
/// Multi-word keywords (entities such as "Winston Churchill") match as a
/// contiguous token run. A plain token-set lookup would never match them and
/// would always count them as missing.
pub fn keyword_match(
    key: &str,
    student: &str,
    limit: usize,
    recognizer: &dyn EntityRecognizer,
) -> f64 {
    let keywords = extract_keywords(key, limit, recognizer);
    if keywords.is_empty() {
        return 0.0;
    }
    let tokens = text::whitespace_tokens(student);
    let token_set: HashSet<&str> = tokens.iter().copied().collect();

    let matches = keywords
        .iter()
        .filter(|k| {
            let parts: Vec<&str> = k.split_whitespace().collect();
            match parts.len() {
                0 => false,
                1 => token_set.contains(parts[0]),
                n => tokens.windows(n).any(|w| w == parts.as_slice()),
            }
        })
        .count();
    matches as f64 / keywords.len() as f64
}

/// Fraction of the key's distinct whole numbers that the student repeats.
pub fn numeric_consistency(key: &str, student: &str) -> f64 {
    let key_nums = text::number_tokens(key);
    if key_nums.is_empty() {
        return 1.0;
    }
    let student_nums = text::number_tokens(student);
    key_nums.intersection(&student_nums).count() as f64 / key_nums.len() as f64
}

/// Fraction of the key's distinct (lower-cased) entities the student mentions.
pub fn entity_overlap(key: &str, student: &str, recognizer: &dyn EntityRecognizer) -> f64 {
    let lowered = |doc: &str| -> HashSet<String> {
        recognizer
            .entities(doc)
            .into_iter()
            .map(|e| e.text.to_lowercase())
            .collect()
    };
    let key_entities = lowered(key);
    if key_entities.is_empty() {
        return 1.0;
    }
    let student_entities = lowered(student);
    key_entities.intersection(&student_entities).count() as f64 / key_entities.len() as f64
}

/// One minus the share of sentences lacking a subject or a predicate.
pub fn grammar_quality(doc: &str, analyzer: &dyn SentenceAnalyzer) -> f64 {
    let parses = analyzer.analyze(doc);
    if parses.is_empty() {
        return 1.0;
    }
    let malformed = parses.iter().filter(|p| !p.is_well_formed()).count();
    1.0 - malformed as f64 / parses.len() as f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellingCheck {
    pub score: f64,
    /// Distinct unknown words (case-insensitive).
    pub errors: usize,
    pub misspelled: Vec<String>,
}

/// One minus distinct unknown words over total word tokens.
pub fn spelling_quality(doc: &str, lexicon: &dyn Lexicon) -> SpellingCheck {
    let words = text::word_tokens(doc);
    if words.is_empty() {
        return SpellingCheck {
            score: 1.0,
            errors: 0,
            misspelled: Vec::new(),
        };
    }
    let misspelled: BTreeSet<String> = words
        .iter()
        .filter(|w| !lexicon.contains(w))
        .map(|w| w.to_lowercase())
        .collect();
    let errors = misspelled.len();
    SpellingCheck {
        score: (1.0 - errors as f64 / words.len() as f64).clamp(0.0, 1.0),
        errors,
        misspelled: misspelled.into_iter().collect(),
    }
}
