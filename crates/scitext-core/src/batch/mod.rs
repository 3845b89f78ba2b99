pub mod config;
pub mod runner;
pub mod writer;

pub use config::{BatchConfig, DEFAULT_ANNOTATION_EXTENSION};
pub use runner::{discover_documents, process_document, run_batch, run_batch_with_progress};
pub use writer::{remove_stale_output, write_atomic};
