//! Conversion of validated import rows into insertable tutorials.

use super::{ImportError, ImportRow, ValidationError, STEP_SEPARATOR, TAG_SEPARATOR};
use crate::category::Category;
use crate::slug::SlugAllocator;
use crate::tutorial::{NewTutorial, PLACEHOLDER_IMAGE};
use crate::types::Timestamp;

/// Split a delimited cell into trimmed, non-empty items, keeping order.
pub fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tags for a row: the `tags` cell plus the `difficulty` cell, which the CSV
/// format defines as an extra tag. A difficulty already among the tags is
/// not repeated.
fn row_tags(row: &ImportRow) -> Vec<String> {
    let mut tags = split_list(&row.tags, TAG_SEPARATOR);
    let difficulty = row.difficulty.trim();
    if !difficulty.is_empty() && !tags.iter().any(|t| t == difficulty) {
        tags.push(difficulty.to_string());
    }
    tags
}

/// Transform rows that passed [`validate`](super::validate) into tutorials.
///
/// `taken_slugs` holds the slugs already present in the store; every
/// generated slug is unique against it and within the batch. The source
/// `id` column is not carried over, the store assigns ids on insert.
///
/// A row whose category does not parse is reported as a validation error,
/// which only happens when this is called without validating first.
pub fn transform(
    rows: &[ImportRow],
    now: Timestamp,
    taken_slugs: &[String],
) -> Result<Vec<NewTutorial>, ImportError> {
    let mut slugs = SlugAllocator::new(taken_slugs.iter().cloned());

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let category = Category::from_str(row.category.trim()).ok_or_else(|| {
                ImportError::Validation(vec![ValidationError::invalid_category(
                    index + 1,
                    &row.category,
                )])
            })?;

            let image = match row.image.trim() {
                "" => PLACEHOLDER_IMAGE.to_string(),
                image => image.to_string(),
            };

            Ok(NewTutorial {
                slug: slugs.allocate(&row.title),
                title: row.title.trim().to_string(),
                description: row.description.trim().to_string(),
                category,
                tags: row_tags(row),
                materials: split_list(&row.materials, STEP_SEPARATOR),
                instructions: split_list(&row.instructions, STEP_SEPARATOR),
                image,
                created_at: now,
            })
        })
        .collect()
}
