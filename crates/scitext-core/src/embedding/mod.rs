//! # Embeddings
//!
//! Turns a directory of article texts (or JSON summaries) into one dense
//! vector per article, keyed by article id.
//!
//! The [`EmbeddingProvider`] trait abstracts over the backend. The
//! `fastembed` feature enables [`FastEmbedProvider`], which runs local ONNX
//! models. [`MockEmbeddingProvider`] produces deterministic vectors without
//! a model download.

pub mod corpus;
#[cfg(feature = "fastembed")]
pub mod fastembed;
pub mod mock;
pub mod store;

pub use corpus::{
    ArticleSummary, EmbeddingDocument, EmbeddingInput, document_id, load_corpus, summary_from_json,
};
#[cfg(feature = "fastembed")]
pub use self::fastembed::{FastEmbedProvider, resolve_model};
pub use mock::MockEmbeddingProvider;
pub use store::{EmbeddingMap, embed_corpus};

use crate::error::Result;

/// Default number of texts passed to the backend per call.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Backend that maps texts to fixed-size vectors.
///
/// Implementations must be `Send + Sync` so a provider can be shared
/// behind a reference across threads.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed several texts, returning one vector per input in order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text])?;
        vectors.pop().ok_or_else(|| {
            crate::error::ScitextError::Embedding("backend returned no vector".into())
        })
    }

    /// Length of every vector this provider returns.
    fn dimension(&self) -> usize;

    /// Model name, for logs.
    fn name(&self) -> &str;
}
