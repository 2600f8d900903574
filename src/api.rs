use crate::config::{Config, ScoringParams};
use crate::error::GfResult;
use crate::nlp::NlpModels;
use crate::plagiarism::{self, PlagiarismReport};
use crate::scorer::{Grader, GradingResult};
use crate::weights::FlagCombination;
use rayon::prelude::*;
use tracing::info;

/// Entry point for collaborators (routing layer, persistence layer, UI).
///
/// Build it once at start-up; it is `Send + Sync` and can be shared across
/// request handlers.
#[derive(Clone)]
pub struct GradingService {
    grader: Grader,
}

impl GradingService {
    /// Loads the built-in models. Fails with `ModelUnavailable` if they
    /// cannot be initialised.
    pub fn new(config: &Config) -> GfResult<Self> {
        let models = NlpModels::load(&config.models)?;
        Ok(Self::with_models(models, config.scoring.clone()))
    }

    /// Uses caller-supplied models.
    pub fn with_models(models: NlpModels, params: ScoringParams) -> Self {
        Self {
            grader: Grader::new(models, params),
        }
    }

    pub fn grader(&self) -> &Grader {
        &self.grader
    }

    pub fn grade_submission(
        &self,
        student_text: &str,
        key_text: &str,
        total_marks: i64,
        flags: FlagCombination,
    ) -> GfResult<GradingResult> {
        let result = self.grader.grade(student_text, key_text, total_marks, flags)?;
        info!(
            "Graded submission [{}]: {} / {} ({:.2}%)",
            flags, result.final_score, total_marks, result.percentage
        );
        Ok(result)
    }

    /// Grades many submissions against one key concurrently. Results are in
    /// input order; one failure does not abort the others.
    pub fn grade_batch<S: AsRef<str> + Sync>(
        &self,
        student_texts: &[S],
        key_text: &str,
        total_marks: i64,
        flags: FlagCombination,
    ) -> Vec<GfResult<GradingResult>> {
        student_texts
            .par_iter()
            .map(|s| self.grader.grade(s.as_ref(), key_text, total_marks, flags))
            .collect()
    }

    pub fn detect_plagiarism<S: AsRef<str>>(&self, documents: &[S]) -> GfResult<PlagiarismReport> {
        plagiarism::detect_plagiarism(documents)
    }
}
