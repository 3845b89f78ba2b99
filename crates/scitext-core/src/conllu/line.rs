//! # Annotation Line Classification
//!
//! Sorts a single line of a tab-separated annotation file into one of the
//! kinds the sentence reconstructor cares about.

/// Marker that starts a comment line.
pub const COMMENT_MARKER: char = '#';

/// Field separator for token lines.
pub const FIELD_SEPARATOR: char = '\t';

/// Index of the surface word form within a token line.
pub const FORM_FIELD: usize = 1;

/// What a single annotation line means to the reconstructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty after trimming; terminates the current sentence.
    Blank,
    /// Starts with `#`; carries no token data.
    Comment,
    /// A token line; holds the surface form (field 1).
    Token(&'a str),
    /// A single-field line (metadata or malformed); silently dropped.
    Ignored,
}

/// Classify one line of an annotation file.
///
/// Surrounding whitespace is trimmed first, so a line holding only spaces
/// or a trailing `\r` still counts as blank.
///
/// # Examples
/// ```
/// use scitext_core::conllu::{classify_line, LineKind};
///
/// assert_eq!(classify_line("1\tHello\tNNP"), LineKind::Token("Hello"));
/// assert_eq!(classify_line("# sent_id = 1"), LineKind::Comment);
/// assert_eq!(classify_line("   "), LineKind::Blank);
/// assert_eq!(classify_line("orphan"), LineKind::Ignored);
/// ```
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with(COMMENT_MARKER) {
        return LineKind::Comment;
    }

    match line.split(FIELD_SEPARATOR).nth(FORM_FIELD) {
        Some(form) => LineKind::Token(form),
        None => LineKind::Ignored,
    }
}
