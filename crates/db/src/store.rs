//! [`TutorialStore`] backed by PostgreSQL.

use async_trait::async_trait;
use opencrochet_core::category::Category;
use opencrochet_core::store::{StoreError, TutorialStore};
use opencrochet_core::tutorial::{NewTutorial, Tutorial};

use crate::models::tutorial::TutorialRow;
use crate::repositories::TutorialRepo;
use crate::DbPool;

/// PostgreSQL unique violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// The production record store.
#[derive(Debug, Clone)]
pub struct PgTutorialStore {
    pool: DbPool,
}

impl PgTutorialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error onto the store taxonomy. Unique constraint violations
/// become [`StoreError::Conflict`] so callers can tell them apart.
fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return StoreError::Conflict(format!(
                "duplicate value violates unique constraint: {constraint}"
            ));
        }
    }
    tracing::error!(error = %err, "Database error");
    StoreError::Backend(err.to_string())
}

fn into_tutorials(rows: Vec<TutorialRow>) -> Result<Vec<Tutorial>, StoreError> {
    rows.into_iter().map(Tutorial::try_from).collect()
}

#[async_trait]
impl TutorialStore for PgTutorialStore {
    async fn list_all(&self) -> Result<Vec<Tutorial>, StoreError> {
        let rows = TutorialRepo::list_all(&self.pool)
            .await
            .map_err(store_error)?;
        into_tutorials(rows)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tutorial>, StoreError> {
        TutorialRepo::find_by_slug(&self.pool, slug)
            .await
            .map_err(store_error)?
            .map(Tutorial::try_from)
            .transpose()
    }

    async fn list_by_category(&self, category: Category) -> Result<Vec<Tutorial>, StoreError> {
        let rows = TutorialRepo::list_by_category(&self.pool, category.as_str())
            .await
            .map_err(store_error)?;
        into_tutorials(rows)
    }

    async fn list_by_tag(&self, tag: &str) -> Result<Vec<Tutorial>, StoreError> {
        let rows = TutorialRepo::list_by_tag(&self.pool, tag)
            .await
            .map_err(store_error)?;
        into_tutorials(rows)
    }

    async fn search(&self, query: &str) -> Result<Vec<Tutorial>, StoreError> {
        let rows = TutorialRepo::search(&self.pool, query)
            .await
            .map_err(store_error)?;
        into_tutorials(rows)
    }

    async fn list_slugs(&self) -> Result<Vec<String>, StoreError> {
        TutorialRepo::list_slugs(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn insert_batch(&self, batch: &[NewTutorial]) -> Result<Vec<Tutorial>, StoreError> {
        let rows = TutorialRepo::insert_batch(&self.pool, batch)
            .await
            .map_err(store_error)?;
        tracing::info!(inserted = rows.len(), "Tutorial batch committed");
        into_tutorials(rows)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }
}
