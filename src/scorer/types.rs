use crate::weights::{FlagCombination, Preset, Signal};
use serde::{Deserialize, Serialize};

/// Raw extractor outputs for one submission.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    pub cosine: f64,
    pub jaccard: f64,
    pub levenshtein: f64,
    pub embedding: f64,
    pub keyword: f64,
    pub numeric: f64,
    pub entity: f64,
    pub grammar: f64,
    pub spelling: f64,

    pub spelling_errors: usize,
    #[serde(default)]
    pub misspelled: Vec<String>,
}

impl SignalScores {
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Cosine => self.cosine,
            Signal::Jaccard => self.jaccard,
            Signal::Levenshtein => self.levenshtein,
            Signal::Embedding => self.embedding,
            Signal::Keyword => self.keyword,
            Signal::Numeric => self.numeric,
            Signal::Entity => self.entity,
            Signal::Grammar => self.grammar,
            Signal::Spelling => self.spelling,
        }
    }
}

/// One row of the audit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalBreakdown {
    pub signal: Signal,
    pub raw_score: f64,
    pub weight: f64,
    /// Marks contributed; negative for the grammar penalty.
    pub weighted_marks: f64,
    /// Denominator: `weight × totalMarks`.
    pub max_marks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    pub final_score: i64,
    pub percentage: f64,
    pub total_marks: i64,

    pub flags: FlagCombination,
    pub preset: Preset,

    /// Sum before rounding and clamping.
    pub unclamped_score: f64,
    pub grammar_penalty: f64,
    pub flat_bonus: f64,
    pub spelling_errors: usize,

    pub scores: SignalScores,
    pub breakdown: Vec<SignalBreakdown>,
}

impl GradingResult {
    pub fn row(&self, signal: Signal) -> Option<&SignalBreakdown> {
        self.breakdown.iter().find(|r| r.signal == signal)
    }
}
