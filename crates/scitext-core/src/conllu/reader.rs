//! # Sentence Reconstruction
//!
//! Rebuilds plain-text sentences from a line-based annotation file. Token
//! lines contribute their surface form, blank lines close the sentence
//! being built, and comments or single-field lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::trace;

use crate::conllu::line::{LineKind, classify_line};
use crate::error::{Result, ScitextError};

/// Word-form accumulator for the sentence currently being built.
///
/// Feed it lines in file order with [`push_line`](Self::push_line) and call
/// [`finish`](Self::finish) once the input is exhausted.
#[derive(Debug, Default)]
pub struct SentenceAccumulator {
    current: Vec<String>,
    sentences: Vec<String>,
}

impl SentenceAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one raw line of annotation text.
    pub fn push_line(&mut self, line: &str) {
        match classify_line(line) {
            LineKind::Blank => self.flush(),
            LineKind::Comment | LineKind::Ignored => {}
            LineKind::Token(form) => self.current.push(form.to_string()),
        }
    }

    /// Number of sentences completed so far.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Returns `true` while word forms are waiting for a sentence break.
    pub fn has_pending(&self) -> bool {
        !self.current.is_empty()
    }

    /// Flush any trailing sentence and return all sentences in order.
    pub fn finish(mut self) -> Vec<String> {
        self.flush();
        self.sentences
    }

    fn flush(&mut self) {
        // Consecutive blank lines land here with nothing pending
        if self.current.is_empty() {
            return;
        }
        let sentence = self.current.join(" ");
        trace!(tokens = self.current.len(), "sentence complete");
        self.sentences.push(sentence);
        self.current.clear();
    }
}

/// Reconstruct sentences from annotation text held in memory.
///
/// # Examples
/// ```
/// use scitext_core::conllu::reconstruct_sentences;
///
/// let text = "# comment\n1\tHello\tNNP\n2\tworld\tNN\n\n3\tBye\tNNP\n";
/// assert_eq!(reconstruct_sentences(text), vec!["Hello world", "Bye"]);
/// ```
pub fn reconstruct_sentences(text: &str) -> Vec<String> {
    let mut acc = SentenceAccumulator::new();
    for line in text.lines() {
        acc.push_line(line);
    }
    acc.finish()
}

/// Reconstruct sentences by streaming lines from a reader.
///
/// # Errors
///
/// Returns the underlying I/O error if a line cannot be read, including
/// input that is not valid UTF-8.
pub fn read_sentences<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut acc = SentenceAccumulator::new();
    for line in reader.lines() {
        acc.push_line(&line?);
    }
    Ok(acc.finish())
}

/// Reconstruct sentences from the annotation file at `path`.
///
/// The file handle is opened and released within this call.
///
/// # Errors
///
/// Returns [`ScitextError::AnnotationNotFound`] if the file does not exist
/// and [`ScitextError::Io`] for any other read failure.
pub fn read_sentences_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScitextError::AnnotationNotFound(path.to_path_buf()),
        _ => ScitextError::io(path, e),
    })?;

    read_sentences(BufReader::new(file)).map_err(|e| ScitextError::io(path, e))
}
