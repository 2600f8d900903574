//! Language-model services used by the signal extractors.
//!
//! Each service is a trait object so callers can inject their own model
//! (a statistical NER, a larger dictionary). The embedding signal uses the
//! pretrained sentence encoder when the `semantic` feature is built in and
//! its model loads; otherwise it degrades to the hashed n-gram embedder.
//! The other built-in services are rule based and fully deterministic.
//!
//! Services are constructed once through [`NlpModels::load`] (or the builder)
//! and are read-only afterwards; grading calls share them through `Arc`.

pub mod embedding;
pub mod entities;
pub mod grammar;
pub mod lexicon;
#[cfg(feature = "semantic")]
pub mod sentence_encoder;

use crate::config::{EmbedderKind, ModelConfig};
use crate::error::{GfResult, GradeForgeError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::Display;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

pub use self::embedding::HashedEmbedder;
pub use self::entities::RuleEntityRecognizer;
pub use self::grammar::HeuristicAnalyzer;
pub use self::lexicon::WordListLexicon;
#[cfg(feature = "semantic")]
pub use self::sentence_encoder::SentenceEncoder;

pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> GfResult<Vec<f32>>;
    fn dimensions(&self) -> usize;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum EntityKind {
    Proper,
    Acronym,
    Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
}

pub trait EntityRecognizer: Send + Sync {
    /// Entity mentions in document order, duplicates included.
    fn entities(&self, text: &str) -> Vec<Entity>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceParse {
    pub has_subject: bool,
    pub has_predicate: bool,
}

impl SentenceParse {
    pub fn is_well_formed(&self) -> bool {
        self.has_subject && self.has_predicate
    }
}

pub trait SentenceAnalyzer: Send + Sync {
    /// One parse per sentence of `text`; empty when there are no sentences.
    fn analyze(&self, text: &str) -> Vec<SentenceParse>;
}

pub trait Lexicon: Send + Sync {
    fn contains(&self, word: &str) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The shared, read-only model bundle.
#[derive(Clone, TypedBuilder)]
pub struct NlpModels {
    pub embedder: Arc<dyn Embedder>,
    pub entities: Arc<dyn EntityRecognizer>,
    pub analyzer: Arc<dyn SentenceAnalyzer>,
    pub lexicon: Arc<dyn Lexicon>,
}

impl NlpModels {
    /// One-time initialisation of the built-in models.
    ///
    /// Fails with `ModelUnavailable` when the requested embedder cannot be
    /// built or an extra dictionary cannot be read.
    pub fn load(config: &ModelConfig) -> GfResult<Self> {
        let embedder = build_embedder(config)?;

        let mut lexicon = WordListLexicon::embedded();
        if let Some(path) = &config.dictionary {
            lexicon.extend_from_file(path)?;
        }
        lexicon.extend(
            config
                .extra_words
                .split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty()),
        );
        if lexicon.is_empty() {
            return Err(GradeForgeError::ModelUnavailable(
                "Spelling dictionary is empty".to_string(),
            ));
        }
        debug!("Dictionary ready with {} words", lexicon.len());

        let lexicon: Arc<dyn Lexicon> = Arc::new(lexicon);
        let models = NlpModels::builder()
            .embedder(embedder)
            .entities(Arc::new(RuleEntityRecognizer::new(lexicon.clone())))
            .analyzer(Arc::new(HeuristicAnalyzer))
            .lexicon(lexicon)
            .build();

        info!(
            "Models loaded (embedder '{}', {} dims)",
            models.embedder.name(),
            models.embedder.dimensions()
        );
        Ok(models)
    }
}

fn build_embedder(config: &ModelConfig) -> GfResult<Arc<dyn Embedder>> {
    let hashed = || -> GfResult<Arc<dyn Embedder>> {
        Ok(Arc::new(HashedEmbedder::new(config.embedding_dims)?))
    };
    match config.embedder {
        EmbedderKind::Hashed => hashed(),
        EmbedderKind::Semantic => load_sentence_encoder(config),
        EmbedderKind::Auto => load_sentence_encoder(config).or_else(|e| {
            warn!("{}; falling back to hashed n-gram embeddings", e);
            hashed()
        }),
    }
}

#[cfg(feature = "semantic")]
fn load_sentence_encoder(config: &ModelConfig) -> GfResult<Arc<dyn Embedder>> {
    Ok(Arc::new(SentenceEncoder::load(
        config.model_cache_dir.as_deref(),
    )?))
}

#[cfg(not(feature = "semantic"))]
fn load_sentence_encoder(_config: &ModelConfig) -> GfResult<Arc<dyn Embedder>> {
    Err(GradeForgeError::ModelUnavailable(
        "sentence encoder not built in (enable the `semantic` feature)".to_string(),
    ))
}
