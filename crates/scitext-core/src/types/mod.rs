pub mod document;
pub mod outcome;

pub use document::{DocumentId, ReconstructedText};
pub use outcome::{DocumentOutcome, DocumentReport, FailedDocument, RunReport};
