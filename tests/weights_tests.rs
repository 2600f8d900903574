use gradeforge::error::GradeForgeError;
use gradeforge::weights::{FlagCombination, Preset, Signal};
use rstest::rstest;
use strum::IntoEnumIterator;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[rstest]
//     tech   gram   spell  preset                        key   gram  spell
#[case(false, false, false, Preset::Normal, 1, 0.05, 0.05, 0.05)]
#[case(true, false, false, Preset::Technical, 2, 0.40, 0.0, 0.01)]
#[case(false, true, false, Preset::Grammar, 3, 0.05, 0.42, 0.01)]
#[case(false, false, true, Preset::Spelling, 4, 0.05, 0.01, 0.42)]
#[case(true, true, false, Preset::TechnicalGrammar, 5, 0.20, 0.23, 0.01)]
#[case(true, false, true, Preset::TechnicalSpelling, 6, 0.22, 0.01, 0.22)]
#[case(false, true, true, Preset::GrammarSpelling, 7, 0.05, 0.23, 0.20)]
#[case(true, true, true, Preset::Comprehensive, 8, 0.15, 0.15, 0.15)]
#[allow(clippy::too_many_arguments)]
fn test_flag_combination_selects_preset(
    #[case] technical: bool,
    #[case] grammar: bool,
    #[case] spelling: bool,
    #[case] expected: Preset,
    #[case] number: u8,
    #[case] keyword: f64,
    #[case] grammar_weight: f64,
    #[case] spelling_weight: f64,
) {
    let flags = FlagCombination::new(technical, grammar, spelling);
    assert_eq!(flags.preset(), expected);
    assert_eq!(expected.number(), number);
    assert_eq!(Preset::from_number(number).unwrap(), expected);
    assert_eq!(expected.flags(), flags);

    let w = flags.weights();
    assert_close(w.keyword, keyword);
    assert_close(w.grammar, grammar_weight);
    assert_close(w.spelling, spelling_weight);
}

#[test]
fn test_lexical_weights_are_shared() {
    for preset in Preset::iter() {
        let w = preset.weights();
        assert_close(w.cosine, 0.20);
        assert_close(w.jaccard, 0.15);
        assert_close(w.levenshtein, 0.10);
    }
}

#[rstest]
#[case(Preset::Normal, 1.00)]
#[case(Preset::Technical, 1.00)]
#[case(Preset::Grammar, 1.00)]
#[case(Preset::Spelling, 1.00)]
#[case(Preset::TechnicalGrammar, 1.00)]
#[case(Preset::TechnicalSpelling, 1.01)]
#[case(Preset::GrammarSpelling, 1.00)]
#[case(Preset::Comprehensive, 1.00)]
fn test_weight_sums_are_kept_as_tabled(#[case] preset: Preset, #[case] sum: f64) {
    assert!((preset.weights().sum() - sum).abs() < 1e-9);
}

#[test]
fn test_normal_preset_full_vector() {
    let w = Preset::Normal.weights();
    let expected = [0.20, 0.15, 0.10, 0.30, 0.05, 0.05, 0.05, 0.05, 0.05];
    for (signal, value) in Signal::iter().zip(expected) {
        assert_close(w.get(signal), value);
    }
}

#[rstest]
#[case("", FlagCombination::new(false, false, false))]
#[case("none", FlagCombination::new(false, false, false))]
#[case("technical", FlagCombination::new(true, false, false))]
#[case("Tech, Spelling", FlagCombination::new(true, false, true))]
#[case("grammar,spelling,technical", FlagCombination::new(true, true, true))]
fn test_parse_flags(#[case] input: &str, #[case] expected: FlagCombination) {
    assert_eq!(input.parse::<FlagCombination>().unwrap(), expected);
}

#[test]
fn test_parse_flags_rejects_unknown() {
    let err = "technical,style".parse::<FlagCombination>().unwrap_err();
    assert!(matches!(err, GradeForgeError::InvalidInput(_)));
}

#[rstest]
#[case(0)]
#[case(9)]
fn test_preset_number_out_of_range(#[case] n: u8) {
    assert!(matches!(
        Preset::from_number(n),
        Err(GradeForgeError::InvalidInput(_))
    ));
}

#[test]
fn test_display_round_trips_through_parse() {
    for flags in FlagCombination::all() {
        assert_eq!(flags.to_string().parse::<FlagCombination>().unwrap(), flags);
    }
    assert_eq!(FlagCombination::default().to_string(), "none");
}

#[test]
fn test_each_combination_maps_to_distinct_preset() {
    let presets: std::collections::HashSet<Preset> =
        FlagCombination::all().map(|f| f.preset()).collect();
    assert_eq!(presets.len(), 8);
}
