//! TF-IDF vector space.
//!
//! Terms are lower-cased word runs of two or more characters. Weights use raw
//! term counts and smoothed IDF, `ln((1 + n) / (1 + df)) + 1`, and every
//! document row is L2-normalised, so cosine similarity is a plain dot product.
//!
//! The space is always fitted on exactly the documents being compared: two
//! documents for the per-pair cosine signal, the whole submission set for
//! plagiarism detection.

use crate::text;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sparse row: (term index, weight), sorted by term index.
pub type SparseRow = Vec<(usize, f64)>;

#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
    pub rows: Vec<SparseRow>,
}

impl TfIdfMatrix {
    pub fn fit_transform<S: AsRef<str>>(docs: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = docs
            .iter()
            .map(|d| text::tfidf_terms(d.as_ref()))
            .collect();

        let vocabulary: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        let counts: Vec<BTreeMap<usize, usize>> = tokenized
            .iter()
            .map(|terms| {
                let mut c = BTreeMap::new();
                for t in terms {
                    *c.entry(index[t.as_str()]).or_insert(0) += 1;
                }
                for &term in c.keys() {
                    df[term] += 1;
                }
                c
            })
            .collect();

        let n = docs.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|c| {
                let mut row: SparseRow = c
                    .into_iter()
                    .map(|(term, count)| (term, count as f64 * idf[term]))
                    .collect();
                let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in &mut row {
                        *w /= norm;
                    }
                }
                row
            })
            .collect();

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Cosine similarity of rows `i` and `j`, clamped to [0, 1].
    pub fn cosine(&self, i: usize, j: usize) -> f64 {
        sparse_dot(&self.rows[i], &self.rows[j]).clamp(0.0, 1.0)
    }

    /// Full symmetric similarity matrix, one row per document.
    pub fn similarity_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.rows.len();
        (0..n)
            .into_par_iter()
            .map(|i| (0..n).map(|j| self.cosine(i, j)).collect())
            .collect()
    }
}

fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    a.iter()
        .merge_join_by(b.iter(), |x, y| x.0.cmp(&y.0))
        .filter_map(|pair| match pair {
            itertools::EitherOrBoth::Both(x, y) => Some(x.1 * y.1),
            _ => None,
        })
        .sum()
}

/// The `limit` most frequent TF-IDF terms of a single document.
///
/// With one document every IDF is 1, so ranking by TF-IDF is ranking by
/// count; ties go to the alphabetically earlier term.
pub fn top_terms(doc: &str, limit: usize) -> Vec<String> {
    text::tfidf_terms(doc)
        .into_iter()
        .counts()
        .into_iter()
        .sorted_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then_with(|| ta.cmp(tb)))
        .take(limit)
        .map(|(t, _)| t)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_have_unit_similarity() {
        let m = TfIdfMatrix::fit_transform(&["the quick brown fox", "the quick brown fox"]);
        assert!((m.cosine(0, 1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents_have_zero_similarity() {
        let m = TfIdfMatrix::fit_transform(&["alpha beta", "gamma delta"]);
        assert_eq!(m.cosine(0, 1), 0.0);
    }

    #[test]
    fn test_smoothed_idf() {
        let m = TfIdfMatrix::fit_transform(&["apple banana", "apple cherry"]);
        let apple = m.vocabulary.iter().position(|t| t == "apple").unwrap();
        let banana = m.vocabulary.iter().position(|t| t == "banana").unwrap();
        assert!((m.idf[apple] - 1.0).abs() < 1e-12);
        assert!((m.idf[banana] - ((3.0f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_vocabulary() {
        let m = TfIdfMatrix::fit_transform(&["a b c", "d"]);
        assert!(m.is_empty());
        assert_eq!(m.cosine(0, 1), 0.0);
    }

    #[test]
    fn test_top_terms_ranked_by_count_then_alphabet() {
        let terms = top_terms("zeta alpha beta beta gamma gamma gamma", 3);
        assert_eq!(terms, vec!["gamma", "beta", "alpha"]);
    }
}
