//! # Metadata Extraction
//!
//! Collects the attributes of per-article `.metadata` tag files into a
//! single table suitable for CSV export.

pub mod parser;
pub mod table;

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

pub use parser::{MetadataParser, MetadataRecord};
pub use table::MetadataTable;

use crate::error::{Result, ScitextError};
use crate::progress::{NoProgress, Progress};
use crate::types::FailedDocument;

/// Default extension of metadata files.
pub const DEFAULT_METADATA_EXTENSION: &str = "metadata";

/// Result of extracting a directory of metadata files.
#[derive(Debug, Clone, Default)]
pub struct MetadataBatch {
    /// One row per successfully read file, in file-name order.
    pub table: MetadataTable,
    /// Files that could not be read.
    pub failed: Vec<FailedDocument>,
}

/// Parse every `*.{extension}` file directly inside `dir`.
///
/// Unreadable files are logged and listed in [`MetadataBatch::failed`];
/// they do not stop the run.
///
/// # Errors
///
/// Returns an error only if `dir` itself cannot be listed.
pub fn extract_directory(dir: &Path, extension: &str) -> Result<MetadataBatch> {
    extract_directory_with_progress(dir, extension, &NoProgress)
}

/// Like [`extract_directory`], reporting each file to `progress`.
///
/// # Errors
///
/// Same as [`extract_directory`].
pub fn extract_directory_with_progress(
    dir: &Path,
    extension: &str,
    progress: &dyn Progress,
) -> Result<MetadataBatch> {
    let parser = MetadataParser::new()?;
    let extension = extension.trim_start_matches('.');

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(extension)
        {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    progress.start(paths.len());
    let mut batch = MetadataBatch::default();
    for path in &paths {
        match std::fs::read_to_string(path) {
            Ok(content) => batch.table.push(parser.parse(&content)),
            Err(e) => {
                let err = ScitextError::io(path, e);
                warn!(error = %err, "skipping metadata file");
                batch.failed.push(FailedDocument {
                    file_name: file_name_of(path),
                    reason: err.to_string(),
                });
            }
        }
        progress.advance(&file_name_of(path));
    }
    progress.finish();

    info!(
        files = paths.len(),
        rows = batch.table.len(),
        columns = batch.table.columns().len(),
        failed = batch.failed.len(),
        "metadata extraction finished"
    );
    Ok(batch)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
