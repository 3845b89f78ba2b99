pub mod line;
pub mod reader;

pub use line::{COMMENT_MARKER, FIELD_SEPARATOR, FORM_FIELD, LineKind, classify_line};
pub use reader::{
    SentenceAccumulator, read_sentences, read_sentences_from_path, reconstruct_sentences,
};
