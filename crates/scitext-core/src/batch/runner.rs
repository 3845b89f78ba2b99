//! # Batch Runner
//!
//! Drives reconstruction over a directory of annotation files. Every
//! document is handled in isolation: failures are recorded in its
//! [`DocumentOutcome`] and the run moves on to the next file.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::batch::config::BatchConfig;
use crate::batch::writer::{remove_stale_output, write_atomic};
use crate::conllu::read_sentences_from_path;
use crate::error::{Result, ScitextError};
use crate::fallback::RawTextLocator;
use crate::progress::{NoProgress, Progress};
use crate::types::{DocumentId, DocumentOutcome, DocumentReport, ReconstructedText, RunReport};

/// List annotation files directly inside the configured input directory.
///
/// Only regular files whose extension matches `config.extension` are
/// returned, sorted by file name.
///
/// # Errors
///
/// Returns [`ScitextError::Walk`] if the directory cannot be read.
pub fn discover_documents(config: &BatchConfig) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(&config.input_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(config.extension.as_str()) {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Reconstruct one document and write its plain text.
///
/// Never fails: every problem ends up in the returned outcome.
pub fn process_document(path: &Path, config: &BatchConfig) -> DocumentReport {
    let locator = config.locator();
    process_with_locator(path, config, &locator)
}

fn process_with_locator(
    path: &Path,
    config: &BatchConfig,
    locator: &RawTextLocator,
) -> DocumentReport {
    let Some(document) = DocumentId::from_path(path) else {
        let name = path.to_string_lossy().into_owned();
        error!(path = %name, "annotation file name is not valid UTF-8");
        return DocumentReport {
            document: DocumentId {
                id: name.clone(),
                file_name: name,
            },
            outcome: DocumentOutcome::Failed {
                reason: "file name is not valid UTF-8".into(),
            },
        };
    };

    let outcome = reconstruct_document(path, &document, config, locator);
    if !outcome.wrote_output() {
        discard_stale_output(&document, config);
    }
    DocumentReport { document, outcome }
}

/// Remove output left by an earlier run for a document that produced none
/// this time.
fn discard_stale_output(document: &DocumentId, config: &BatchConfig) {
    let dest = config.output_path(&document.output_file_name());
    match remove_stale_output(&dest) {
        Ok(true) => warn!(document = %document, "removed stale output from a previous run"),
        Ok(false) => {}
        Err(e) => error!(document = %document, error = %e, "failed to remove stale output"),
    }
}

fn reconstruct_document(
    path: &Path,
    document: &DocumentId,
    config: &BatchConfig,
    locator: &RawTextLocator,
) -> DocumentOutcome {
    let sentences = match read_sentences_from_path(path) {
        Ok(sentences) => sentences,
        Err(ScitextError::AnnotationNotFound(_)) => {
            warn!(document = %document, "annotation file missing, trying raw fallback");
            Vec::new()
        }
        Err(e) => {
            error!(document = %document, error = %e, "failed to read annotation file");
            return DocumentOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    let text = if sentences.is_empty() {
        match load_fallback(document, config, locator) {
            Ok(Some(raw)) => ReconstructedText::Raw(raw),
            Ok(None) => return DocumentOutcome::Unrecoverable,
            Err(e) => {
                error!(document = %document, error = %e, "failed to read raw fallback");
                return DocumentOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        }
    } else {
        ReconstructedText::Sentences(sentences)
    };

    let dest = config.output_path(&document.output_file_name());
    if let Err(e) = write_atomic(&dest, &text.render()) {
        error!(document = %document, error = %e, "failed to write output");
        return DocumentOutcome::Failed {
            reason: e.to_string(),
        };
    }

    match text {
        ReconstructedText::Sentences(sentences) => {
            debug!(document = %document, sentences = sentences.len(), "reconstructed");
            DocumentOutcome::Sentences {
                count: sentences.len(),
            }
        }
        ReconstructedText::Raw(raw) => {
            debug!(document = %document, bytes = raw.len(), "wrote raw fallback");
            DocumentOutcome::RawFallback { bytes: raw.len() }
        }
    }
}

/// Load the fallback text, mapping "missing" to `Ok(None)`.
fn load_fallback(
    document: &DocumentId,
    config: &BatchConfig,
    locator: &RawTextLocator,
) -> Result<Option<String>> {
    match locator.load(&document.id) {
        Ok(raw) if config.skip_empty_fallback && raw.trim().is_empty() => {
            warn!(document = %document, "no sentences and raw fallback is empty");
            Ok(None)
        }
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.is_not_found() => {
            warn!(document = %document, "no sentences and no raw fallback");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Run reconstruction over every annotation file in the input directory.
///
/// # Errors
///
/// Only setup problems are returned: an invalid configuration, an output
/// directory that cannot be created, an unreadable input directory, or a
/// worker pool that cannot be built. Per-document failures are reported in
/// the returned [`RunReport`].
pub fn run_batch(config: &BatchConfig) -> Result<RunReport> {
    run_batch_with_progress(config, &NoProgress)
}

/// Like [`run_batch`], reporting each finished document to `progress`.
///
/// # Errors
///
/// Same as [`run_batch`].
pub fn run_batch_with_progress(config: &BatchConfig, progress: &dyn Progress) -> Result<RunReport> {
    config.validate()?;

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| ScitextError::io(&config.output_dir, e))?;

    let paths = discover_documents(config)?;
    info!(
        documents = paths.len(),
        input = %config.input_dir.display(),
        workers = config.workers,
        "starting reconstruction"
    );

    progress.start(paths.len());
    let locator = config.locator();
    let process = |path: &PathBuf| {
        let report = process_with_locator(path, config, &locator);
        progress.advance(&report.document.file_name);
        report
    };
    let reports: Vec<DocumentReport> = if config.workers > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()?;
        pool.install(|| paths.par_iter().map(process).collect())
    } else {
        paths.iter().map(process).collect()
    };
    progress.finish();

    let report = RunReport::from_documents(reports);
    info!(
        total = report.total,
        reconstructed = report.reconstructed,
        fallback = report.fallback,
        unrecoverable = report.unrecoverable.len(),
        failed = report.failed.len(),
        "reconstruction finished"
    );

    Ok(report)
}
