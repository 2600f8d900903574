//! All-pairs textual overlap over a submission set.

use crate::error::{GfResult, GradeForgeError};
use crate::scorer::tfidf::TfIdfMatrix;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismPair {
    /// Position in the caller's document list; always `index_a < index_b`.
    pub index_a: usize,
    pub index_b: usize,
    /// Percentage in [0, 100], rounded to two decimals.
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismReport {
    /// Sorted by similarity, highest first.
    pub pairs: Vec<PlagiarismPair>,
    /// Empty or whitespace-only documents left out of the comparison.
    pub discarded: usize,
    pub compared: usize,
}

impl PlagiarismReport {
    /// Pairs with similarity strictly greater than `threshold` percent.
    pub fn above(&self, threshold: f64) -> impl Iterator<Item = &PlagiarismPair> {
        self.pairs.iter().filter(move |p| p.similarity > threshold)
    }
}

fn round_percent(similarity: f64) -> f64 {
    ((similarity * 100.0).clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// Compares every pair of non-empty documents in one shared TF-IDF space.
///
/// Fails with `InsufficientInput` when fewer than two documents have any
/// non-whitespace content. Ties keep (i, j) ascending order.
pub fn detect_plagiarism<S: AsRef<str>>(documents: &[S]) -> GfResult<PlagiarismReport> {
    let kept: Vec<(usize, &str)> = documents
        .iter()
        .map(|d| d.as_ref())
        .enumerate()
        .filter(|(_, doc)| !doc.trim().is_empty())
        .collect();
    let discarded = documents.len() - kept.len();

    if discarded > 0 {
        warn!(
            "{} empty document(s) excluded from plagiarism detection",
            discarded
        );
    }
    if kept.len() < 2 {
        return Err(GradeForgeError::InsufficientInput {
            remaining: kept.len(),
            discarded,
        });
    }

    let texts: Vec<&str> = kept.iter().map(|(_, doc)| *doc).collect();
    let matrix = TfIdfMatrix::fit_transform(&texts).similarity_matrix();

    let mut pairs: Vec<PlagiarismPair> = (0..kept.len())
        .tuple_combinations()
        .map(|(i, j)| PlagiarismPair {
            index_a: kept[i].0,
            index_b: kept[j].0,
            similarity: round_percent(matrix[i][j]),
        })
        .collect();
    pairs.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    info!(
        "Compared {} documents ({} pairs)",
        kept.len(),
        pairs.len()
    );

    Ok(PlagiarismReport {
        pairs,
        discarded,
        compared: kept.len(),
    })
}
