use std::path::Path;

use serde::{Deserialize, Serialize};

/// Identity of one annotated document, derived from its file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId {
    /// File name with its last extension removed (e.g. `docA`).
    pub id: String,
    /// Original file name (e.g. `docA.conllu`).
    pub file_name: String,
}

impl DocumentId {
    /// Derive the identity from an annotation file path.
    ///
    /// Returns `None` if the path has no UTF-8 file name.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let id = path.file_stem()?.to_str()?.to_string();
        Some(Self { id, file_name })
    }

    /// File name of the plain-text output for this document.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!("{}.txt", self.id)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.file_name)
    }
}

/// Text recovered for a document, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconstructedText {
    /// Sentences rebuilt from token lines, in encounter order.
    Sentences(Vec<String>),
    /// Verbatim raw text from the fallback source.
    Raw(String),
}

impl ReconstructedText {
    /// Render to the exact content of the output file.
    ///
    /// Sentences are written one per line, each newline-terminated; raw
    /// text is returned unchanged.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Sentences(sentences) => {
                let mut out = String::with_capacity(sentences.iter().map(|s| s.len() + 1).sum());
                for sentence in sentences {
                    out.push_str(sentence);
                    out.push('\n');
                }
                out
            }
            Self::Raw(text) => text.clone(),
        }
    }

    /// Returns `true` if this text came from the raw fallback.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}
