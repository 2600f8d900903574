use gradeforge::config::{Config, ScoringParams};
use gradeforge::plagiarism::detect_plagiarism;
use gradeforge::scorer::aggregate::aggregate;
use gradeforge::scorer::SignalScores;
use gradeforge::weights::FlagCombination;
use gradeforge::GradingService;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::LazyLock;

static SERVICE: LazyLock<GradingService> =
    LazyLock::new(|| GradingService::new(&Config::default()).expect("built-in models load"));

// --- STRATEGIES ---

prop_compose! {
    fn arb_scores()(
        cosine in 0.0..=1.0f64,
        jaccard in 0.0..=1.0f64,
        levenshtein in 0.0..=1.0f64,
        embedding in 0.0..=1.0f64,
        keyword in 0.0..=1.0f64,
        numeric in 0.0..=1.0f64,
        entity in 0.0..=1.0f64,
        grammar in 0.0..=1.0f64,
        spelling in 0.0..=1.0f64,
    ) -> SignalScores {
        SignalScores {
            cosine,
            jaccard,
            levenshtein,
            embedding,
            keyword,
            numeric,
            entity,
            grammar,
            spelling,
            ..Default::default()
        }
    }
}

prop_compose! {
    fn arb_flags()(bits in 0u8..8) -> FlagCombination {
        FlagCombination::from_bits(bits)
    }
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,]{0,80}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_aggregate_stays_within_bounds(
        scores in arb_scores(),
        flags in arb_flags(),
        total in 1i64..500,
        bonus in 0.0..20.0f64,
    ) {
        let params = ScoringParams { flat_bonus: bonus, ..Default::default() };
        let r = aggregate(&scores, flags, total, &params);
        prop_assert!(r.final_score >= 0);
        prop_assert!(r.final_score <= total);
        prop_assert!((0.0..=100.0).contains(&r.percentage));
        prop_assert_eq!(r.breakdown.len(), 9);
    }

    #[test]
    fn prop_negative_scores_only_when_allowed(
        scores in arb_scores(),
        flags in arb_flags(),
        total in 1i64..500,
    ) {
        let params = ScoringParams {
            flat_bonus: 0.0,
            allow_negative_scores: true,
            ..Default::default()
        };
        let r = aggregate(&scores, flags, total, &params);
        prop_assert!(r.final_score <= total);
        prop_assert_eq!(r.final_score, r.unclamped_score.round_ties_even().min(total as f64) as i64);
    }

    #[test]
    fn prop_grading_arbitrary_text_is_bounded(
        student in arb_text(),
        key in arb_text(),
        flags in arb_flags(),
        total in 1i64..200,
    ) {
        let r = SERVICE.grade_submission(&student, &key, total, flags).unwrap();
        prop_assert!(r.final_score >= 0 && r.final_score <= total);
        for signal in [r.scores.cosine, r.scores.jaccard, r.scores.levenshtein,
                       r.scores.embedding, r.scores.keyword, r.scores.numeric,
                       r.scores.entity, r.scores.grammar, r.scores.spelling] {
            prop_assert!((0.0..=1.0).contains(&signal));
        }
    }

    #[test]
    fn prop_plagiarism_pairs_are_complete_and_sorted(
        docs in prop::collection::vec("[a-e]{1,3}( [a-e]{1,3}){0,6}", 2..7),
    ) {
        let report = detect_plagiarism(&docs).unwrap();
        let n = docs.len();
        prop_assert_eq!(report.pairs.len(), n * (n - 1) / 2);

        let mut seen = HashSet::new();
        for p in &report.pairs {
            prop_assert!(p.index_a < p.index_b);
            prop_assert!(p.index_b < n);
            prop_assert!(seen.insert((p.index_a, p.index_b)));
            prop_assert!((0.0..=100.0).contains(&p.similarity));
        }
        for w in report.pairs.windows(2) {
            prop_assert!(w[0].similarity >= w[1].similarity);
        }
    }
}
