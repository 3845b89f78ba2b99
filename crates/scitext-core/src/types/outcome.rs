use serde::{Deserialize, Serialize};

use super::document::DocumentId;

/// What happened to a single document during a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Sentences were reconstructed and written one per line.
    Sentences {
        /// Number of sentences written.
        count: usize,
    },
    /// No sentences were found; the raw fallback text was written verbatim.
    RawFallback {
        /// Size of the text written, in bytes.
        bytes: usize,
    },
    /// Neither reconstruction nor fallback produced any text.
    Unrecoverable,
    /// An I/O failure other than a missing file stopped this document.
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

impl DocumentOutcome {
    /// Returns `true` if an output file was written.
    #[must_use]
    pub fn wrote_output(&self) -> bool {
        matches!(self, Self::Sentences { .. } | Self::RawFallback { .. })
    }
}

impl std::fmt::Display for DocumentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sentences { count } => write!(f, "{count} sentences"),
            Self::RawFallback { bytes } => write!(f, "raw fallback ({bytes} bytes)"),
            Self::Unrecoverable => f.write_str("unrecoverable"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// A document paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub document: DocumentId,
    pub outcome: DocumentOutcome,
}

/// A document that could not be processed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FailedDocument {
    pub file_name: String,
    pub reason: String,
}

/// Summary of a whole batch run.
///
/// Document lists are sorted by file name so the report is identical
/// whichever order documents were processed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Documents examined.
    pub total: usize,
    /// Documents written from reconstructed sentences.
    pub reconstructed: usize,
    /// Documents written from the raw fallback.
    pub fallback: usize,
    /// File names of documents with neither sentences nor fallback text.
    pub unrecoverable: Vec<String>,
    /// Documents that hit an I/O failure.
    pub failed: Vec<FailedDocument>,
}

impl RunReport {
    /// Merge per-document reports into a run summary.
    #[must_use]
    pub fn from_documents<I>(reports: I) -> Self
    where
        I: IntoIterator<Item = DocumentReport>,
    {
        let mut report = Self::default();
        for DocumentReport { document, outcome } in reports {
            report.total += 1;
            match outcome {
                DocumentOutcome::Sentences { .. } => report.reconstructed += 1,
                DocumentOutcome::RawFallback { .. } => report.fallback += 1,
                DocumentOutcome::Unrecoverable => report.unrecoverable.push(document.file_name),
                DocumentOutcome::Failed { reason } => report.failed.push(FailedDocument {
                    file_name: document.file_name,
                    reason,
                }),
            }
        }
        report.unrecoverable.sort();
        report.failed.sort();
        report
    }

    /// Number of documents for which an output file was written.
    #[must_use]
    pub fn written(&self) -> usize {
        self.reconstructed + self.fallback
    }

    /// Returns `true` if every document produced an output file.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unrecoverable.is_empty() && self.failed.is_empty()
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RunReport(total={}, reconstructed={}, fallback={}, unrecoverable={}, failed={})",
            self.total,
            self.reconstructed,
            self.fallback,
            self.unrecoverable.len(),
            self.failed.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> DocumentId {
        DocumentId::from_path(std::path::Path::new(name)).unwrap()
    }

    fn report(name: &str, outcome: DocumentOutcome) -> DocumentReport {
        DocumentReport {
            document: doc(name),
            outcome,
        }
    }

    #[test]
    fn run_report_counts_and_sorts() {
        let run = RunReport::from_documents(vec![
            report("c.conllu", DocumentOutcome::Unrecoverable),
            report("a.conllu", DocumentOutcome::Sentences { count: 3 }),
            report("b.conllu", DocumentOutcome::Unrecoverable),
            report("d.conllu", DocumentOutcome::RawFallback { bytes: 12 }),
            report(
                "e.conllu",
                DocumentOutcome::Failed {
                    reason: "denied".into(),
                },
            ),
        ]);

        assert_eq!(run.total, 5);
        assert_eq!(run.reconstructed, 1);
        assert_eq!(run.fallback, 1);
        assert_eq!(run.written(), 2);
        assert_eq!(run.unrecoverable, vec!["b.conllu", "c.conllu"]);
        assert_eq!(run.failed.len(), 1);
        assert!(!run.is_complete());
    }

    #[test]
    fn empty_run_is_complete() {
        let run = RunReport::from_documents(Vec::new());
        assert_eq!(run.total, 0);
        assert!(run.is_complete());
    }

    #[test]
    fn outcome_wrote_output() {
        assert!(DocumentOutcome::Sentences { count: 1 }.wrote_output());
        assert!(DocumentOutcome::RawFallback { bytes: 0 }.wrote_output());
        assert!(!DocumentOutcome::Unrecoverable.wrote_output());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_string(&DocumentOutcome::Sentences { count: 2 }).unwrap();
        assert_eq!(json, r#"{"status":"sentences","count":2}"#);

        let json = serde_json::to_string(&DocumentOutcome::Unrecoverable).unwrap();
        assert_eq!(json, r#"{"status":"unrecoverable"}"#);
    }

    #[test]
    fn run_report_display() {
        let run = RunReport::from_documents(vec![report(
            "a.conllu",
            DocumentOutcome::Unrecoverable,
        )]);
        let display = run.to_string();
        assert!(display.contains("total=1"));
        assert!(display.contains("unrecoverable=1"));
    }
}
