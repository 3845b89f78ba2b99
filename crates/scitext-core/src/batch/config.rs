//! # Batch Configuration
//!
//! Directories and knobs for one reconstruction run.

use std::path::{Path, PathBuf};

use crate::error::{Result, ScitextError};
use crate::fallback::{DEFAULT_FALLBACK_PREFIX, RawTextLocator};

/// Default extension of annotation files.
pub const DEFAULT_ANNOTATION_EXTENSION: &str = "conllu";

/// Configuration for a reconstruction batch.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory holding the annotation files.
    pub input_dir: PathBuf,
    /// Directory holding raw-text fallback files.
    pub raw_dir: PathBuf,
    /// Directory the plain-text outputs are written to.
    pub output_dir: PathBuf,
    /// Extension (without dot) that marks annotation files.
    pub extension: String,
    /// Prefix of raw-text fallback file names.
    pub fallback_prefix: String,
    /// Number of worker threads; 1 processes documents sequentially.
    pub workers: usize,
    /// Treat a whitespace-only fallback file as missing.
    pub skip_empty_fallback: bool,
}

impl BatchConfig {
    /// Create a configuration with default extension, prefix and a single worker.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        raw_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            raw_dir: raw_dir.into(),
            output_dir: output_dir.into(),
            extension: DEFAULT_ANNOTATION_EXTENSION.to_string(),
            fallback_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
            workers: 1,
            skip_empty_fallback: true,
        }
    }

    /// Set the annotation file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the raw-text fallback prefix.
    pub fn with_fallback_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fallback_prefix = prefix.into();
        self
    }

    /// Set the worker count. Zero is raised to one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Whether a whitespace-only fallback file counts as missing.
    pub fn with_skip_empty_fallback(mut self, skip: bool) -> Self {
        self.skip_empty_fallback = skip;
        self
    }

    /// Build the raw-text locator this configuration describes.
    pub fn locator(&self) -> RawTextLocator {
        RawTextLocator::new(&self.raw_dir).with_prefix(&self.fallback_prefix)
    }

    /// Output path for a document's plain text.
    pub fn output_path(&self, output_file_name: &str) -> PathBuf {
        self.output_dir.join(output_file_name)
    }

    /// Check that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`ScitextError::InvalidConfig`] if the input directory is not
    /// a directory, the extension is empty, or the output directory is the
    /// input directory.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            return Err(ScitextError::InvalidConfig(format!(
                "input directory {} does not exist",
                self.input_dir.display()
            )));
        }
        if self.extension.is_empty() {
            return Err(ScitextError::InvalidConfig(
                "annotation extension must not be empty".into(),
            ));
        }
        if same_dir(&self.input_dir, &self.output_dir) {
            return Err(ScitextError::InvalidConfig(
                "output directory must differ from the input directory".into(),
            ));
        }
        Ok(())
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
