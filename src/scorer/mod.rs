pub mod aggregate;
pub mod signals;
pub mod tfidf;
pub mod types;

pub use self::types::{GradingResult, SignalBreakdown, SignalScores};
use crate::config::ScoringParams;
use crate::error::{GfResult, GradeForgeError};
use crate::nlp::NlpModels;
use crate::weights::FlagCombination;
use tracing::debug;

/// Grades one submission against one key.
///
/// Holds the shared model bundle; cloning a `Grader` is cheap and every clone
/// reads the same models.
#[derive(Clone)]
pub struct Grader {
    pub models: NlpModels,
    pub params: ScoringParams,
}

impl Grader {
    pub fn new(models: NlpModels, params: ScoringParams) -> Self {
        Self { models, params }
    }

    /// Runs all nine extractors. They are independent, so the lexical,
    /// semantic and content groups run in parallel; all complete before
    /// this returns.
    pub fn extract(&self, student: &str, key: &str) -> GfResult<SignalScores> {
        let models = &self.models;
        let limit = self.params.keyword_limit;

        let ((cosine, jaccard, levenshtein), (embedding, content)) = rayon::join(
            || {
                (
                    signals::cosine_similarity(student, key),
                    signals::jaccard_similarity(student, key),
                    signals::levenshtein_similarity(student, key),
                )
            },
            || {
                rayon::join(
                    || signals::embedding_similarity(models.embedder.as_ref(), student, key),
                    || {
                        (
                            signals::keyword_match(key, student, limit, models.entities.as_ref()),
                            signals::numeric_consistency(key, student),
                            signals::entity_overlap(key, student, models.entities.as_ref()),
                            signals::grammar_quality(student, models.analyzer.as_ref()),
                            signals::spelling_quality(student, models.lexicon.as_ref()),
                        )
                    },
                )
            },
        );
        let (keyword, numeric, entity, grammar, spelling) = content;

        let scores = SignalScores {
            cosine,
            jaccard,
            levenshtein,
            embedding: embedding?,
            keyword,
            numeric,
            entity,
            grammar,
            spelling: spelling.score,
            spelling_errors: spelling.errors,
            misspelled: spelling.misspelled,
        };
        debug!(?scores, "Signals extracted");
        Ok(scores)
    }

    pub fn grade(
        &self,
        student: &str,
        key: &str,
        total_marks: i64,
        flags: FlagCombination,
    ) -> GfResult<GradingResult> {
        if total_marks <= 0 {
            return Err(GradeForgeError::InvalidInput(format!(
                "total marks must be positive, got {}",
                total_marks
            )));
        }
        let scores = self.extract(student, key)?;
        Ok(aggregate::aggregate(&scores, flags, total_marks, &self.params))
    }
}
