//! Hashed n-gram embedder, the fallback when the sentence encoder is not
//! available.
//!
//! Projects word unigrams, word bigrams and character trigrams into a fixed
//! number of buckets with FNV-1a hashing, then L2-normalises. The same text
//! always yields the same vector and there is no model file to load, but the
//! vectors capture shared wording only: paraphrases with different words
//! score low.

use super::Embedder;
use crate::error::{GfResult, GradeForgeError};

const UNIGRAM_WEIGHT: f32 = 1.0;
const BIGRAM_WEIGHT: f32 = 0.5;
const TRIGRAM_WEIGHT: f32 = 0.25;

pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> GfResult<Self> {
        if dimensions == 0 {
            return Err(GradeForgeError::ModelUnavailable(
                "Embedding dimensions must be greater than 0".to_string(),
            ));
        }
        Ok(Self { dimensions })
    }

    fn bucket(&self, feature: &str) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in feature.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % self.dimensions as u64) as usize
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect()
    }
}

impl Embedder for HashedEmbedder {
    fn embed(&self, text: &str) -> GfResult<Vec<f32>> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return Ok(vec);
        }

        for tok in &tokens {
            vec[self.bucket(tok)] += UNIGRAM_WEIGHT;

            let padded: Vec<char> = format!("#{}#", tok).chars().collect();
            for window in padded.windows(3) {
                let gram: String = window.iter().collect();
                vec[self.bucket(&format!("c:{}", gram))] += TRIGRAM_WEIGHT;
            }
        }
        for pair in tokens.windows(2) {
            vec[self.bucket(&format!("b:{} {}", pair[0], pair[1]))] += BIGRAM_WEIGHT;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        Ok(vec)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-ngram"
    }
}

/// Cosine similarity of two dense vectors; 0 when either has zero norm.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na <= f64::EPSILON || nb <= f64::EPSILON {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_is_rejected() {
        assert!(matches!(
            HashedEmbedder::new(0),
            Err(GradeForgeError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_deterministic_and_normalized() {
        let e = HashedEmbedder::new(128).unwrap();
        let a = e.embed("Photosynthesis converts light energy").unwrap();
        let b = e.embed("Photosynthesis converts light energy").unwrap();
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_related_text_scores_higher() {
        let e = HashedEmbedder::new(384).unwrap();
        let key = e.embed("the mitochondria produces energy for the cell").unwrap();
        let close = e.embed("mitochondria produce the energy of a cell").unwrap();
        let far = e.embed("rivers flow toward distant oceans").unwrap();
        assert!(cosine(&key, &close) > cosine(&key, &far));
    }

    #[test]
    fn test_punctuation_only_is_zero_vector() {
        let e = HashedEmbedder::new(16).unwrap();
        let v = e.embed("?!...").unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
        assert_eq!(cosine(&v, &v), 0.0);
    }
}
