//! Loading the texts to embed.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;
use walkdir::WalkDir;

use crate::error::{Result, ScitextError};

/// What kind of files make up the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingInput {
    /// Plain `<id>.txt` article texts, embedded as-is.
    #[default]
    Texts,
    /// `<id>.json` summaries; the title and tl;dr are embedded together.
    JsonSummaries,
}

impl EmbeddingInput {
    /// File extension this input reads.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Texts => "txt",
            Self::JsonSummaries => "json",
        }
    }
}

impl fmt::Display for EmbeddingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Texts => write!(f, "text"),
            Self::JsonSummaries => write!(f, "json"),
        }
    }
}

/// One article ready to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingDocument {
    /// Article id derived from the file name.
    pub id: String,
    /// Text handed to the model.
    pub text: String,
}

/// The fields of a JSON summary that get embedded. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSummary {
    pub revised_title: String,
    pub tldr: String,
}

impl ArticleSummary {
    /// Title and tl;dr separated by a blank line.
    pub fn embedding_text(&self) -> String {
        format!("{}\n\n{}", self.revised_title, self.tldr)
    }
}

/// Article id of `path`: the file name up to its first dot.
///
/// `rstl_1665_0001.txt` and `rstl_1665_0001.summary.json` both give
/// `rstl_1665_0001`. Returns `None` for paths without a UTF-8 file name.
pub fn document_id(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let id = name.split('.').next().unwrap_or(name);
    Some(id.to_string())
}

/// Parse a JSON summary and assemble its embedding text.
///
/// # Errors
///
/// Returns the serde error if the JSON is malformed or lacks
/// `revised_title` or `tldr`.
pub fn summary_from_json(content: &str) -> std::result::Result<String, serde_json::Error> {
    let summary: ArticleSummary = serde_json::from_str(content)?;
    Ok(summary.embedding_text())
}

/// Read every matching file directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Fails on the first file that cannot be read or parsed, or if `dir`
/// cannot be listed.
pub fn load_corpus(dir: &Path, input: EmbeddingInput) -> Result<Vec<EmbeddingDocument>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some(input.extension())
        {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in &paths {
        let Some(id) = document_id(path) else {
            return Err(ScitextError::InvalidConfig(format!(
                "file name is not valid UTF-8: {}",
                path.display()
            )));
        };
        let content = std::fs::read_to_string(path).map_err(|e| ScitextError::io(path, e))?;
        let text = match input {
            EmbeddingInput::Texts => content,
            EmbeddingInput::JsonSummaries => {
                summary_from_json(&content).map_err(|e| ScitextError::json(path, e))?
            }
        };
        documents.push(EmbeddingDocument { id, text });
    }

    info!(documents = documents.len(), input = %input, dir = %dir.display(), "loaded corpus");
    Ok(documents)
}
