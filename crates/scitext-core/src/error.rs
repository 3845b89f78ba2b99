use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during scitext core operations.
#[derive(Debug, Error)]
pub enum ScitextError {
    /// The annotation file for a document does not exist.
    #[error("annotation file not found: {}", .0.display())]
    AnnotationNotFound(PathBuf),

    /// The raw-text fallback for a document does not exist.
    #[error("raw text fallback not found: {}", .0.display())]
    FallbackNotFound(PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file or directory being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Walking an input directory failed.
    #[error("failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The batch configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// Writing the metadata table failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON file could not be parsed or written.
    #[error("JSON error on {}: {source}", path.display())]
    Json {
        /// The JSON file being read or written.
        path: PathBuf,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The embedding backend failed or is misconfigured.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The rayon worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScitextError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wraps a JSON error with the file it happened on.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error means a file was absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::AnnotationNotFound(_) | Self::FallbackNotFound(_) => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Result type alias for scitext operations.
pub type Result<T> = std::result::Result<T, ScitextError>;
