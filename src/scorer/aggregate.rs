use super::types::{GradingResult, SignalBreakdown, SignalScores};
use crate::config::ScoringParams;
use crate::weights::{FlagCombination, Signal};
use strum::IntoEnumIterator;
use tracing::debug;

/// Combines extractor outputs into a mark out of `total_marks`.
///
/// Every signal except grammar contributes `raw × weight × total × spelling`,
/// so spelling quality scales all of them, its own term included. Grammar is
/// subtracted as `weight × total × (1 − grammar)`. A flat bonus is added, the
/// sum is rounded half-to-even and capped at `total_marks`.
///
/// By default the result is also floored at 0. With `allow_negative_scores`
/// set there is no lower bound, and a heavy grammar penalty can push the mark
/// below zero. `unclamped_score` is reported either way.
///
/// `total_marks` must already be validated as positive.
pub fn aggregate(
    scores: &SignalScores,
    flags: FlagCombination,
    total_marks: i64,
    params: &ScoringParams,
) -> GradingResult {
    let preset = flags.preset();
    let weights = preset.weights();
    let total = total_marks as f64;
    let dampening = scores.spelling;

    let mut breakdown = Vec::with_capacity(9);
    let mut earned = 0.0;
    let mut grammar_penalty = 0.0;

    for signal in Signal::iter() {
        let raw = scores.get(signal);
        let weight = weights.get(signal);
        let max_marks = weight * total;

        let weighted_marks = if signal == Signal::Grammar {
            grammar_penalty = max_marks * (1.0 - raw);
            -grammar_penalty
        } else {
            let marks = raw * max_marks * dampening;
            earned += marks;
            marks
        };

        breakdown.push(SignalBreakdown {
            signal,
            raw_score: raw,
            weight,
            weighted_marks,
            max_marks,
        });
    }

    let unclamped_score = earned - grammar_penalty + params.flat_bonus;
    let mut final_score = unclamped_score.round_ties_even().min(total);
    if !params.allow_negative_scores {
        final_score = final_score.max(0.0);
    }
    let final_score = final_score as i64;

    debug!(
        "Aggregate [{}]: earned {:.2}, grammar -{:.2}, bonus {:.1} -> {} / {}",
        preset, earned, grammar_penalty, params.flat_bonus, final_score, total_marks
    );

    GradingResult {
        final_score,
        percentage: final_score as f64 / total * 100.0,
        total_marks,
        flags,
        preset,
        unclamped_score,
        grammar_penalty,
        flat_bonus: params.flat_bonus,
        spelling_errors: scores.spelling_errors,
        scores: scores.clone(),
        breakdown,
    }
}
