use crate::error::{GfResult, GradeForgeError};
use crate::weights::FlagCombination;
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub scoring: ScoringParams,
    #[command(flatten)]
    pub models: ModelConfig,
    #[command(flatten)]
    pub plagiarism: PlagiarismParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Flat bonus added before clamping.
    #[arg(long, default_value_t = 5.0)]
    pub flat_bonus: f64,

    /// Keep negative final scores instead of flooring them at 0.
    #[arg(long, default_value_t = false)]
    pub allow_negative_scores: bool,

    /// Top TF-IDF terms taken from the key for keyword matching.
    #[arg(long, default_value_t = 10)]
    pub keyword_limit: usize,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            flat_bonus: 5.0,
            allow_negative_scores: false,
            keyword_limit: 10,
        }
    }
}

/// Which sentence embedder backs the embedding signal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmbedderKind {
    /// The sentence encoder when it loads, otherwise the hashed fallback.
    #[default]
    Auto,
    /// The all-MiniLM-L6-v2 sentence encoder; failing to load it is an error.
    Semantic,
    /// Hashed n-gram vectors only.
    Hashed,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    #[arg(long, value_enum, default_value_t = EmbedderKind::Auto)]
    pub embedder: EmbedderKind,

    /// Directory holding (or receiving) the sentence encoder files.
    #[arg(long)]
    pub model_cache_dir: Option<PathBuf>,

    /// Vector size of the hashed fallback embedder.
    #[arg(long, default_value_t = 384)]
    pub embedding_dims: usize,

    /// Extra word list (one word per line) merged into the spelling dictionary.
    #[arg(long)]
    pub dictionary: Option<PathBuf>,

    /// Comma-separated words to treat as correctly spelled.
    #[arg(long, default_value = "")]
    pub extra_words: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            embedder: EmbedderKind::Auto,
            model_cache_dir: None,
            embedding_dims: 384,
            dictionary: None,
            extra_words: String::new(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlagiarismParams {
    /// Report only pairs strictly above this similarity percentage.
    #[arg(long, default_value_t = 65.0)]
    pub threshold: f64,

    /// Documents with this many words or fewer are skipped before comparison.
    #[arg(long, default_value_t = 10)]
    pub min_words: usize,

    /// Compare texts as extracted, without normalisation or boilerplate removal.
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    #[arg(long, default_value = "terms and conditions,copyright,all rights reserved")]
    pub boilerplate: String,
}

impl Default for PlagiarismParams {
    fn default() -> Self {
        Self {
            threshold: 65.0,
            min_words: 10,
            raw: false,
            boilerplate: "terms and conditions,copyright,all rights reserved".to_string(),
        }
    }
}

impl PlagiarismParams {
    pub fn boilerplate_phrases(&self) -> Vec<String> {
        self.boilerplate
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GradeForgeError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrites file-loaded values with flags the user typed explicitly.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(scoring.flat_bonus);
        update_if_present!(scoring.allow_negative_scores);
        update_if_present!(scoring.keyword_limit);

        update_if_present!(models.embedder);
        update_if_present!(models.model_cache_dir);
        update_if_present!(models.embedding_dims);
        update_if_present!(models.dictionary);
        update_if_present!(models.extra_words);

        update_if_present!(plagiarism.threshold);
        update_if_present!(plagiarism.min_words);
        update_if_present!(plagiarism.raw);
        update_if_present!(plagiarism.boilerplate);
    }
}

/// An assignment as stored by the persistence layer: the key document,
/// the total marks and the grading emphases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSpec {
    #[serde(default)]
    pub key_path: Option<PathBuf>,
    pub total_marks: i64,
    #[serde(flatten)]
    pub flags: FlagCombination,
}

impl AssignmentSpec {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GradeForgeError::Config(format!(
                "Failed to read assignment '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut spec: AssignmentSpec = serde_json::from_str(&content)?;

        // A relative key path is resolved against the assignment file.
        if let (Some(key), Some(dir)) = (&spec.key_path, path.parent()) {
            if key.is_relative() {
                spec.key_path = Some(dir.join(key));
            }
        }
        Ok(spec)
    }
}
