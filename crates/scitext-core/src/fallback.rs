//! # Raw-Text Fallback
//!
//! Locates the unsegmented raw text that stands in for a document whose
//! annotation file yields no sentences. The file naming convention lives
//! here and nowhere else.

use std::path::{Path, PathBuf};

use crate::error::{Result, ScitextError};

/// Prefix the Royal Society Corpus puts on its raw OCR text files.
pub const DEFAULT_FALLBACK_PREFIX: &str = "Royal_Society_Corpus_open_v6.0_text_";

/// Extension of raw-text fallback files.
pub const FALLBACK_EXTENSION: &str = "txt";

/// Maps document ids to raw-text files in a fallback directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTextLocator {
    dir: PathBuf,
    prefix: String,
}

impl RawTextLocator {
    /// Create a locator for `dir` using the default corpus prefix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
        }
    }

    /// Set the file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Directory searched for fallback files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name prefix applied to document ids.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path of the fallback file for `document_id`.
    ///
    /// # Examples
    /// ```
    /// use scitext_core::RawTextLocator;
    /// use std::path::Path;
    ///
    /// let locator = RawTextLocator::new("raw").with_prefix("prefix_");
    /// assert_eq!(locator.path_for("docA"), Path::new("raw/prefix_docA.txt"));
    /// ```
    pub fn path_for(&self, document_id: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", self.prefix, document_id, FALLBACK_EXTENSION))
    }

    /// Read the fallback text for `document_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ScitextError::FallbackNotFound`] if no fallback file exists
    /// and [`ScitextError::Io`] if it exists but cannot be read.
    pub fn load(&self, document_id: &str) -> Result<String> {
        let path = self.path_for(document_id);
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScitextError::FallbackNotFound(path),
            _ => ScitextError::io(path, e),
        })
    }
}
