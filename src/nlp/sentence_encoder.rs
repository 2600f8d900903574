//! Pretrained sentence encoder (all-MiniLM-L6-v2, 384 dimensions).
//!
//! Runs the ONNX model through `fastembed`, which handles tokenization,
//! mean pooling and normalisation. Model files are fetched into the cache
//! directory on first use; later loads read them from disk.

use super::Embedder;
use crate::error::{GfResult, GradeForgeError};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

const MODEL_NAME: &str = "all-MiniLM-L6-v2";
const DIMENSIONS: usize = 384;

pub struct SentenceEncoder {
    /// Inference needs exclusive access to the session.
    model: Mutex<TextEmbedding>,
}

impl SentenceEncoder {
    /// Loads the encoder. Any failure (missing files, no network for the
    /// first download, ONNX runtime errors) is `ModelUnavailable`.
    pub fn load(cache_dir: Option<&Path>) -> GfResult<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir.to_path_buf());
        }

        let model = TextEmbedding::try_new(options).map_err(|e| {
            GradeForgeError::ModelUnavailable(format!("{}: {}", MODEL_NAME, e))
        })?;
        debug!(model = MODEL_NAME, dims = DIMENSIONS, "Sentence encoder loaded");

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for SentenceEncoder {
    fn embed(&self, text: &str) -> GfResult<Vec<f32>> {
        let mut model = self.model.lock().map_err(|e| {
            GradeForgeError::ModelUnavailable(format!("encoder lock poisoned: {}", e))
        })?;
        let mut vectors = model
            .embed(vec![text], None)
            .map_err(|e| GradeForgeError::ModelUnavailable(format!("inference failed: {}", e)))?;
        vectors
            .pop()
            .ok_or_else(|| GradeForgeError::ModelUnavailable("encoder returned no vector".into()))
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }

    fn name(&self) -> &str {
        MODEL_NAME
    }
}
