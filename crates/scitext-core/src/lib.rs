//! # Scitext Core
//!
//! Turns a corpus of annotated scientific articles into plain text. Rebuilds
//! sentences from tab-separated annotation files, falls back to raw text
//! when no sentence can be recovered, and tabulates per-article metadata.
//!
//! ## Quick Start
//!
//! ```rust
//! use scitext_core::conllu::reconstruct_sentences;
//!
//! let conllu = "# sent_id = 1\n1\tHello\tNNP\n2\tworld\tNN\n\n3\tBye\tNNP\n";
//! let sentences = reconstruct_sentences(conllu);
//!
//! assert_eq!(sentences, vec!["Hello world", "Bye"]);
//! ```
pub mod batch;
pub mod conllu;
pub mod embedding;
pub mod error;
pub mod fallback;
pub mod metadata;
pub mod progress;
pub mod types;

// Re-export primary API
pub use batch::{
    BatchConfig, discover_documents, process_document, run_batch, run_batch_with_progress,
};
pub use conllu::{SentenceAccumulator, read_sentences_from_path, reconstruct_sentences};
pub use embedding::{
    EmbeddingDocument, EmbeddingInput, EmbeddingMap, EmbeddingProvider, MockEmbeddingProvider,
    document_id, embed_corpus, load_corpus,
};
pub use error::{Result, ScitextError};
pub use fallback::{DEFAULT_FALLBACK_PREFIX, RawTextLocator};
pub use metadata::{
    MetadataBatch, MetadataParser, MetadataRecord, MetadataTable, extract_directory,
    extract_directory_with_progress,
};
pub use progress::{NoProgress, Progress, ProgressBarReporter};
pub use types::{DocumentId, DocumentOutcome, DocumentReport, ReconstructedText, RunReport};
