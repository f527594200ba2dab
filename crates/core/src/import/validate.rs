//! Row validation for CSV imports.
//!
//! Validation never fails: it returns every problem it finds so the source
//! file can be fixed in one pass. Any error rejects the whole batch.

use serde::{Deserialize, Serialize};

use super::transform::split_list;
use super::{ImportRow, MAX_DISPLAYED_ERRORS, STEP_SEPARATOR};
use crate::category::Category;

/// Columns that must be non-empty in every row.
pub const REQUIRED_FIELDS: &[&str] = &[
    "title",
    "description",
    "category",
    "instructions",
    "materials",
];

/// What is wrong with a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    MissingField { field: String },
    InvalidCategory { value: String },
}

/// A single row-level validation problem. `row` is 1-indexed over data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    #[serde(flatten)]
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn missing(row: usize, field: &str) -> Self {
        Self {
            row,
            kind: ValidationErrorKind::MissingField {
                field: field.to_string(),
            },
        }
    }

    pub fn invalid_category(row: usize, value: &str) -> Self {
        Self {
            row,
            kind: ValidationErrorKind::InvalidCategory {
                value: value.to_string(),
            },
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ValidationErrorKind::MissingField { field } => {
                write!(f, "Row {}: Missing required field '{field}'", self.row)
            }
            ValidationErrorKind::InvalidCategory { value } => {
                write!(f, "Row {}: Invalid category '{value}'", self.row)
            }
        }
    }
}

/// Whether a required column is effectively empty. List columns are empty
/// when they hold nothing but separators and whitespace.
fn is_blank(row: &ImportRow, name: &str) -> bool {
    match name {
        "title" => row.title.trim().is_empty(),
        "description" => row.description.trim().is_empty(),
        "category" => row.category.trim().is_empty(),
        "instructions" => split_list(&row.instructions, STEP_SEPARATOR).is_empty(),
        "materials" => split_list(&row.materials, STEP_SEPARATOR).is_empty(),
        _ => false,
    }
}

/// Check every row and return all problems found, in row order.
///
/// Whitespace-only values (and list cells holding only separators) count as
/// missing. A category is only checked against the enumeration when it is
/// present.
pub fn validate(rows: &[ImportRow]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;

        for name in REQUIRED_FIELDS {
            if is_blank(row, name) {
                errors.push(ValidationError::missing(row_number, name));
            }
        }

        let category = row.category.trim();
        if !category.is_empty() && Category::from_str(category).is_none() {
            errors.push(ValidationError::invalid_category(row_number, &row.category));
        }
    }

    errors
}

/// Render the messages for display: the first five, then a count of the
/// rest.
///
/// ```
/// use opencrochet_core::import::{summarize, ValidationError};
///
/// let errors: Vec<_> = (1..=7).map(|row| ValidationError::missing(row, "title")).collect();
/// let lines = summarize(&errors);
/// assert_eq!(lines.len(), 6);
/// assert_eq!(lines[5], "...and 2 more errors");
/// ```
pub fn summarize(errors: &[ValidationError]) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .iter()
        .take(MAX_DISPLAYED_ERRORS)
        .map(ToString::to_string)
        .collect();

    if errors.len() > MAX_DISPLAYED_ERRORS {
        lines.push(format!(
            "...and {} more errors",
            errors.len() - MAX_DISPLAYED_ERRORS
        ));
    }
    lines
}
