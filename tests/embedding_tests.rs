use gradeforge::config::{EmbedderKind, ModelConfig};
use gradeforge::nlp::NlpModels;
use gradeforge::scorer::signals::embedding_similarity;

fn models(kind: EmbedderKind) -> gradeforge::error::GfResult<NlpModels> {
    NlpModels::load(&ModelConfig {
        embedder: kind,
        ..Default::default()
    })
}

#[test]
fn test_hashed_embedder_on_request() {
    let m = models(EmbedderKind::Hashed).unwrap();
    assert_eq!(m.embedder.name(), "hashed-ngram");
    assert_eq!(m.embedder.dimensions(), 384);
}

#[cfg(not(feature = "semantic"))]
#[test]
fn test_semantic_request_fails_without_encoder() {
    use gradeforge::error::GradeForgeError;
    assert!(matches!(
        models(EmbedderKind::Semantic),
        Err(GradeForgeError::ModelUnavailable(_))
    ));
}

#[cfg(not(feature = "semantic"))]
#[test]
fn test_auto_degrades_to_hashed() {
    let m = models(EmbedderKind::Auto).unwrap();
    assert_eq!(m.embedder.name(), "hashed-ngram");
}

#[cfg(feature = "semantic")]
#[test]
#[ignore = "downloads all-MiniLM-L6-v2 on first run"]
fn test_paraphrase_scores_above_unrelated_text() {
    let m = models(EmbedderKind::Semantic).unwrap();
    assert_eq!(m.embedder.name(), "all-MiniLM-L6-v2");
    assert_eq!(m.embedder.dimensions(), 384);

    let e = m.embedder.as_ref();
    let key = "The automobile is very fast";
    let paraphrase = embedding_similarity(e, key, "A car can go quickly").unwrap();
    let unrelated = embedding_similarity(e, key, "Rivers erode valleys slowly").unwrap();
    assert!(paraphrase > 0.5, "paraphrase similarity {}", paraphrase);
    assert!(paraphrase > unrelated);
}

#[test]
fn test_hashed_fallback_tracks_wording_only() {
    let m = models(EmbedderKind::Hashed).unwrap();
    let e = m.embedder.as_ref();
    let key = "The automobile is very fast";
    let same_words = embedding_similarity(e, key, "The automobile is very slow").unwrap();
    let paraphrase = embedding_similarity(e, key, "A car can go quickly").unwrap();
    assert!(same_words > paraphrase);
}
