//! The record store abstraction.
//!
//! The catalog never talks to a database directly; it consumes the query
//! shapes below. `opencrochet-db` implements them over PostgreSQL and
//! [`InMemoryStore`] implements them over an injected dataset.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::category::Category;
use crate::tutorial::{NewTutorial, Tutorial};
use crate::types::DbId;

/// Failure reported by a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the query.
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A write violated a uniqueness constraint.
    #[error("Store conflict: {0}")]
    Conflict(String),

    /// A stored row could not be mapped onto the domain model.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Query and insert primitives offered by a tutorial record store.
#[async_trait]
pub trait TutorialStore: Send + Sync {
    /// Every tutorial, in store order.
    async fn list_all(&self) -> Result<Vec<Tutorial>, StoreError>;

    /// The tutorial with the given slug, if any.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tutorial>, StoreError>;

    /// Tutorials whose category equals `category`.
    async fn list_by_category(&self, category: Category) -> Result<Vec<Tutorial>, StoreError>;

    /// Tutorials whose tag array contains `tag`.
    async fn list_by_tag(&self, tag: &str) -> Result<Vec<Tutorial>, StoreError>;

    /// Tutorials whose title, description or category contains `query`,
    /// case-insensitively.
    async fn search(&self, query: &str) -> Result<Vec<Tutorial>, StoreError>;

    /// Every slug currently in use.
    async fn list_slugs(&self) -> Result<Vec<String>, StoreError>;

    /// Insert a batch atomically and return the persisted rows. Either every
    /// row is inserted or none is.
    async fn insert_batch(&self, batch: &[NewTutorial]) -> Result<Vec<Tutorial>, StoreError>;

    /// Cheap liveness probe.
    async fn health_check(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A [`TutorialStore`] over an in-process dataset.
///
/// Enforces slug uniqueness the same way the database constraint does, so a
/// batch that collides is rejected whole.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: RwLock<Vec<Tutorial>>,
}

impl InMemoryStore {
    pub fn new(dataset: Vec<Tutorial>) -> Self {
        Self {
            rows: RwLock::new(dataset),
        }
    }

    async fn select<F>(&self, predicate: F) -> Vec<Tutorial>
    where
        F: Fn(&Tutorial) -> bool,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|t| predicate(t))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TutorialStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Tutorial>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tutorial>, StoreError> {
        Ok(self.select(|t| t.slug == slug).await.into_iter().next())
    }

    async fn list_by_category(&self, category: Category) -> Result<Vec<Tutorial>, StoreError> {
        Ok(self.select(|t| t.category == category).await)
    }

    async fn list_by_tag(&self, tag: &str) -> Result<Vec<Tutorial>, StoreError> {
        Ok(self.select(|t| t.has_tag(tag)).await)
    }

    async fn search(&self, query: &str) -> Result<Vec<Tutorial>, StoreError> {
        let needle = query.to_lowercase();
        Ok(self.select(|t| t.matches_text(&needle)).await)
    }

    async fn list_slugs(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .map(|t| t.slug.clone())
            .collect())
    }

    async fn insert_batch(&self, batch: &[NewTutorial]) -> Result<Vec<Tutorial>, StoreError> {
        let mut rows = self.rows.write().await;

        // Validate the whole batch before touching the dataset.
        let mut seen: std::collections::HashSet<&str> =
            rows.iter().map(|t| t.slug.as_str()).collect();
        for item in batch {
            if !seen.insert(item.slug.as_str()) {
                return Err(StoreError::Conflict(format!(
                    "duplicate slug '{}' violates uq_tutorials_slug",
                    item.slug
                )));
            }
        }

        let mut next_id: DbId = rows.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let mut inserted = Vec::with_capacity(batch.len());
        for item in batch {
            inserted.push(item.clone().into_tutorial(next_id));
            next_id += 1;
        }
        rows.extend(inserted.iter().cloned());

        Ok(inserted)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
