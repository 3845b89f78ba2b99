//! Local embedding models through `fastembed`.
//!
//! `fastembed::TextEmbedding` is not `Sync`, so the model sits behind a
//! `Mutex` and batches are embedded one at a time.
//!
//! Requires the `fastembed` feature.

use std::path::Path;
use std::sync::Mutex;

use tracing::info;

use crate::embedding::EmbeddingProvider;
use crate::error::{Result, ScitextError};

/// Map a model name to a fastembed model.
///
/// Accepts short names (`bge-small-en-v1.5`), Hugging Face ids
/// (`BAAI/bge-small-en-v1.5`) and the enum variant names.
///
/// # Errors
///
/// Returns [`ScitextError::Embedding`] for an unknown name.
pub fn resolve_model(name: &str) -> Result<fastembed::EmbeddingModel> {
    use fastembed::EmbeddingModel;

    match name {
        "bge-small-en-v1.5" | "BAAI/bge-small-en-v1.5" | "BGESmallENV15" => {
            Ok(EmbeddingModel::BGESmallENV15)
        }
        "all-minilm-l6-v2" | "sentence-transformers/all-MiniLM-L6-v2" | "AllMiniLML6V2" => {
            Ok(EmbeddingModel::AllMiniLML6V2)
        }
        "bge-base-en-v1.5" | "BAAI/bge-base-en-v1.5" | "BGEBaseENV15" => {
            Ok(EmbeddingModel::BGEBaseENV15)
        }
        "bge-large-en-v1.5" | "BAAI/bge-large-en-v1.5" | "BGELargeENV15" => {
            Ok(EmbeddingModel::BGELargeENV15)
        }
        other => Err(ScitextError::Embedding(format!(
            "unknown embedding model '{other}'. Supported: bge-small-en-v1.5, all-minilm-l6-v2, bge-base-en-v1.5, bge-large-en-v1.5"
        ))),
    }
}

/// Provider backed by a locally cached fastembed model.
///
/// | Name | Dimension |
/// |------|-----------|
/// | `bge-small-en-v1.5` | 384 |
/// | `all-minilm-l6-v2` | 384 |
/// | `bge-base-en-v1.5` | 768 |
/// | `bge-large-en-v1.5` | 1024 |
pub struct FastEmbedProvider {
    model: Mutex<fastembed::TextEmbedding>,
    dimension: usize,
    model_name: String,
}

impl FastEmbedProvider {
    /// Load `model_name`, downloading it into `cache_dir` (or fastembed's
    /// default cache) on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ScitextError::Embedding`] if the name is unknown or the
    /// model cannot be loaded.
    pub fn new(model_name: &str, cache_dir: Option<&Path>) -> Result<Self> {
        let mut init = fastembed::InitOptions::new(resolve_model(model_name)?);
        if let Some(dir) = cache_dir {
            init = init.with_cache_dir(dir.to_path_buf());
        }

        let mut model = fastembed::TextEmbedding::try_new(init).map_err(|e| {
            ScitextError::Embedding(format!("failed to initialize model {model_name}: {e}"))
        })?;

        let dimension = model
            .embed(vec!["dimension check"], None)
            .map_err(|e| ScitextError::Embedding(format!("failed to embed: {e}")))?
            .first()
            .map(Vec::len)
            .ok_or_else(|| ScitextError::Embedding("model returned no vector".into()))?;

        info!(model = model_name, dimension, "embedding model ready");
        Ok(Self {
            model: Mutex::new(model),
            dimension,
            model_name: model_name.to_string(),
        })
    }
}

impl EmbeddingProvider for FastEmbedProvider {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut model = self
            .model
            .lock()
            .map_err(|e| ScitextError::Embedding(format!("model lock poisoned: {e}")))?;
        model
            .embed(texts.to_vec(), None)
            .map_err(|e| ScitextError::Embedding(format!("batch embedding failed: {e}")))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

impl std::fmt::Debug for FastEmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedProvider")
            .field("model", &self.model_name)
            .field("dimension", &self.dimension)
            .finish()
    }
}
