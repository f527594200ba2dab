//! Tutorial row model.

use opencrochet_core::category::Category;
use opencrochet_core::store::StoreError;
use opencrochet_core::tutorial::Tutorial;
use opencrochet_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `tutorials` table. `category` is stored as text and
/// checked by a constraint; it is parsed into [`Category`] on conversion.
#[derive(Debug, Clone, FromRow)]
pub struct TutorialRow {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub materials: Vec<String>,
    pub instructions: Vec<String>,
    pub image: String,
    pub created_at: Timestamp,
}

impl TryFrom<TutorialRow> for Tutorial {
    type Error = StoreError;

    fn try_from(row: TutorialRow) -> Result<Self, Self::Error> {
        let category = Category::from_str(&row.category).ok_or_else(|| {
            StoreError::Corrupt(format!(
                "tutorial {} has unknown category '{}'",
                row.id, row.category
            ))
        })?;

        Ok(Tutorial {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            category,
            tags: row.tags,
            materials: row.materials,
            instructions: row.instructions,
            image: row.image,
            created_at: row.created_at,
        })
    }
}
