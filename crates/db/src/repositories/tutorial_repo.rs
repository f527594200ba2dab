//! Repository for the `tutorials` table.
//!
//! Covers the five query shapes the catalog consumes: select-all,
//! equality on a column, array containment, OR-of-ILIKE search, and a
//! transactional batch insert returning the new rows.

use opencrochet_core::tutorial::NewTutorial;
use sqlx::PgPool;

use crate::models::tutorial::TutorialRow;

/// Column list for `tutorials` queries.
const COLUMNS: &str = "\
    id, slug, title, description, category, tags, materials, \
    instructions, image, created_at";

/// Escape `LIKE` metacharacters so user input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Provides read and batch-insert operations for tutorials.
pub struct TutorialRepo;

impl TutorialRepo {
    /// All tutorials in insertion order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<TutorialRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tutorials ORDER BY id");
        sqlx::query_as::<_, TutorialRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a tutorial by its slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<TutorialRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tutorials WHERE slug = $1");
        sqlx::query_as::<_, TutorialRow>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Tutorials whose category equals `category`.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<TutorialRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tutorials WHERE category = $1 ORDER BY id");
        sqlx::query_as::<_, TutorialRow>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Tutorials whose `tags` array contains `tag` (exact element match).
    pub async fn list_by_tag(pool: &PgPool, tag: &str) -> Result<Vec<TutorialRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tutorials WHERE tags @> ARRAY[$1]::TEXT[] ORDER BY id"
        );
        sqlx::query_as::<_, TutorialRow>(&query)
            .bind(tag)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over title, description and
    /// category.
    pub async fn search(pool: &PgPool, text: &str) -> Result<Vec<TutorialRow>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(text));
        let query = format!(
            "SELECT {COLUMNS} FROM tutorials \
             WHERE title ILIKE $1 OR description ILIKE $1 OR category ILIKE $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, TutorialRow>(&query)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// Every slug in use.
    pub async fn list_slugs(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM tutorials")
            .fetch_all(pool)
            .await
    }

    /// Insert a batch inside one transaction and return the new rows in
    /// batch order. Any failure rolls the whole batch back.
    pub async fn insert_batch(
        pool: &PgPool,
        batch: &[NewTutorial],
    ) -> Result<Vec<TutorialRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO tutorials \
                (slug, title, description, category, tags, materials, instructions, image, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut rows = Vec::with_capacity(batch.len());
        for item in batch {
            let row = sqlx::query_as::<_, TutorialRow>(&query)
                .bind(&item.slug)
                .bind(&item.title)
                .bind(&item.description)
                .bind(item.category.as_str())
                .bind(&item.tags)
                .bind(&item.materials)
                .bind(&item.instructions)
                .bind(&item.image)
                .bind(item.created_at)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }
        tx.commit().await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("size_2"), "size\\_2");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("granny"), "granny");
    }
}
