//! Embedding a corpus and persisting the id-to-vector map.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::batch::write_atomic;
use crate::embedding::{EmbeddingDocument, EmbeddingProvider};
use crate::error::{Result, ScitextError};
use crate::progress::Progress;

/// Article id to embedding vector, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingMap {
    vectors: BTreeMap<String, Vec<f32>>,
}

impl EmbeddingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `vector` under `id`. A repeated id replaces the earlier vector.
    pub fn insert(&mut self, id: impl Into<String>, vector: Vec<f32>) {
        let id = id.into();
        if self.vectors.contains_key(&id) {
            warn!(id = %id, "duplicate article id, keeping the later embedding");
        }
        self.vectors.insert(id, vector);
    }

    pub fn get(&self, id: &str) -> Option<&[f32]> {
        self.vectors.get(id).map(Vec::as_slice)
    }

    /// Iterate in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.vectors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Write the map as JSON to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ScitextError::Json`] if serialization fails or
    /// [`ScitextError::Io`] if the file cannot be written.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self).map_err(|e| ScitextError::json(path, e))?;
        write_atomic(path, &json)
    }

    /// Read a map previously written by [`EmbeddingMap::write_json`].
    ///
    /// # Errors
    ///
    /// Returns [`ScitextError::Io`] or [`ScitextError::Json`].
    pub fn read_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ScitextError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ScitextError::json(path, e))
    }
}

/// Embed `documents` in batches of `batch_size`, reporting each document
/// to `progress`.
///
/// # Errors
///
/// Returns [`ScitextError::InvalidConfig`] for a zero batch size, or the
/// provider's error. A backend that returns the wrong number of vectors
/// gives [`ScitextError::Embedding`].
pub fn embed_corpus(
    documents: &[EmbeddingDocument],
    provider: &dyn EmbeddingProvider,
    batch_size: usize,
    progress: &dyn Progress,
) -> Result<EmbeddingMap> {
    if batch_size == 0 {
        return Err(ScitextError::InvalidConfig(
            "batch size must be at least 1".into(),
        ));
    }

    info!(
        documents = documents.len(),
        model = provider.name(),
        dimension = provider.dimension(),
        "embedding corpus"
    );
    progress.start(documents.len());

    let mut map = EmbeddingMap::new();
    for chunk in documents.chunks(batch_size) {
        let texts: Vec<&str> = chunk.iter().map(|d| d.text.as_str()).collect();
        let vectors = provider.embed_batch(&texts)?;
        if vectors.len() != chunk.len() {
            return Err(ScitextError::Embedding(format!(
                "expected {} vectors, backend returned {}",
                chunk.len(),
                vectors.len()
            )));
        }
        for (document, vector) in chunk.iter().zip(vectors) {
            progress.advance(&document.id);
            map.insert(document.id.clone(), vector);
        }
        debug!(batch = chunk.len(), "embedded batch");
    }

    progress.finish();
    info!(embeddings = map.len(), "embedding finished");
    Ok(map)
}
