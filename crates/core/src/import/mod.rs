//! CSV bulk import of tutorials.
//!
//! Stages run strictly in order and any failure ends the import:
//!
//! 1. [`parse`]: CSV bytes into raw [`ImportRow`]s.
//! 2. [`validate`]: accumulate every [`ValidationError`] across all rows.
//! 3. [`transform`]: valid rows into [`NewTutorial`](crate::tutorial::NewTutorial)s.
//! 4. upload: one atomic batch insert through a
//!    [`TutorialStore`](crate::store::TutorialStore).
//!
//! [`ImportPipeline`] drives the stages; only the upload stage has an
//! external effect.

pub mod parse;
pub mod pipeline;
pub mod transform;
pub mod validate;

pub use parse::{parse, ImportRow};
pub use pipeline::{ImportOutcome, ImportPipeline, ImportStage};
pub use transform::transform;
pub use validate::{summarize, validate, ValidationError, ValidationErrorKind};

/// Separator for the `tags` column.
pub const TAG_SEPARATOR: char = ',';

/// Separator for the `instructions` and `materials` columns.
pub const STEP_SEPARATOR: char = '|';

/// Accepted upload file extension.
pub const CSV_EXTENSION: &str = ".csv";

/// Number of validation messages shown before the "and N more" line.
pub const MAX_DISPLAYED_ERRORS: usize = 5;

/// Why an import was aborted.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The upload is not a CSV file.
    #[error("Invalid file format: '{0}' is not a CSV file")]
    InvalidFile(String),

    /// The CSV structure is malformed.
    #[error("CSV parsing error: {0}")]
    Parse(String),

    /// One or more rows failed validation. The whole batch is rejected.
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// The record store rejected the batch.
    #[error("Failed to upload tutorials: {0}")]
    Upload(String),

    /// Another import is still running.
    #[error("An import is already in progress")]
    InProgress,
}

/// Whether `file_name` names a CSV file (case-insensitive extension check).
pub fn is_csv_file_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(CSV_EXTENSION)
}
