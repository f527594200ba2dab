//! Read access to the tutorial collection.
//!
//! [`Catalog`] wraps a [`TutorialStore`] and never lets a store failure reach
//! the caller: failed queries are logged and degrade to the injected fallback
//! dataset (queried the same way) or, without one, to an empty result.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::category::Category;
use crate::filter::{self, FilterState};
use crate::store::{StoreError, TutorialStore};
use crate::tutorial::Tutorial;
use crate::types::DbId;

/// The tutorials listed immediately before and after a given one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Neighbors {
    pub previous: Option<Tutorial>,
    pub next: Option<Tutorial>,
}

/// Read layer over a record store with graceful degradation.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn TutorialStore>,
    fallback: Arc<Vec<Tutorial>>,
}

impl Catalog {
    /// A catalog with no fallback: failed queries return empty results.
    pub fn new(store: Arc<dyn TutorialStore>) -> Self {
        Self {
            store,
            fallback: Arc::new(Vec::new()),
        }
    }

    /// Serve `dataset` whenever the store cannot answer.
    pub fn with_fallback(mut self, dataset: Vec<Tutorial>) -> Self {
        self.fallback = Arc::new(dataset);
        self
    }

    /// The underlying store, for writes and health checks.
    pub fn store(&self) -> Arc<dyn TutorialStore> {
        Arc::clone(&self.store)
    }

    fn degrade(&self, operation: &'static str, err: StoreError, state: &FilterState) -> Vec<Tutorial> {
        tracing::warn!(
            operation,
            error = %err,
            fallback_size = self.fallback.len(),
            "Tutorial store query failed, serving fallback data"
        );
        filter::apply_filters(&self.fallback, state)
    }

    /// Every tutorial.
    pub async fn all(&self) -> Vec<Tutorial> {
        match self.store.list_all().await {
            Ok(rows) => rows,
            Err(e) => self.degrade("list_all", e, &FilterState::default()),
        }
    }

    /// The tutorial with the given slug.
    pub async fn by_slug(&self, slug: &str) -> Option<Tutorial> {
        match self.store.find_by_slug(slug).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(slug, error = %e, "Tutorial lookup by slug failed");
                self.fallback.iter().find(|t| t.slug == slug).cloned()
            }
        }
    }

    /// Tutorials in `category`.
    pub async fn by_category(&self, category: Category) -> Vec<Tutorial> {
        match self.store.list_by_category(category).await {
            Ok(rows) => rows,
            Err(e) => {
                let state = FilterState {
                    category: Some(category),
                    ..Default::default()
                };
                self.degrade("list_by_category", e, &state)
            }
        }
    }

    /// Tutorials carrying `tag`.
    pub async fn by_tag(&self, tag: &str) -> Vec<Tutorial> {
        match self.store.list_by_tag(tag).await {
            Ok(rows) => rows,
            Err(e) => {
                let state = FilterState {
                    tag: Some(tag.to_string()),
                    ..Default::default()
                };
                self.degrade("list_by_tag", e, &state)
            }
        }
    }

    /// Free-text search over title, description and category.
    pub async fn search(&self, query: &str) -> Vec<Tutorial> {
        match self.store.search(query).await {
            Ok(rows) => rows,
            Err(e) => {
                let state = FilterState {
                    query: Some(query.to_string()),
                    ..Default::default()
                };
                self.degrade("search", e, &state)
            }
        }
    }

    /// Distinct categories in use, in first-seen order.
    pub async fn categories(&self) -> Vec<Category> {
        let mut categories = Vec::new();
        for t in self.all().await {
            if !categories.contains(&t.category) {
                categories.push(t.category);
            }
        }
        categories
    }

    /// Distinct tags in use, in first-seen order.
    pub async fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for t in self.all().await {
            for tag in t.tags {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }

    /// The listing for `state`, composed from store queries.
    ///
    /// The category criterion selects via the store's equality query. Without
    /// one, a tag criterion selects via the store's array-contains query, and
    /// otherwise everything is selected. A tag alongside a category narrows
    /// that set in memory, and the text criterion keeps only running-set
    /// members that the store's search also returned. Order follows the
    /// running set.
    ///
    /// If any of those queries fails the whole listing degrades at once, so
    /// store rows are never intersected with fallback rows.
    pub async fn filtered(&self, state: &FilterState) -> Vec<Tutorial> {
        let results = match self.compose(state).await {
            Ok(rows) => rows,
            Err(e) => self.degrade("filtered", e, state),
        };

        tracing::debug!(
            category = ?state.category,
            tag = ?state.tag,
            query = ?state.query,
            results = results.len(),
            "Composed tutorial listing"
        );
        results
    }

    async fn compose(&self, state: &FilterState) -> Result<Vec<Tutorial>, StoreError> {
        let tag = state.active_tag();

        let mut results = match (state.category, tag) {
            (Some(category), _) => self.store.list_by_category(category).await?,
            (None, Some(tag)) => self.store.list_by_tag(tag).await?,
            (None, None) => self.store.list_all().await?,
        };

        if let (Some(_), Some(tag)) = (state.category, tag) {
            results.retain(|t| t.has_tag(tag));
        }

        if let Some(query) = state.active_query() {
            let hits: HashSet<DbId> = self
                .store
                .search(query)
                .await?
                .into_iter()
                .map(|t| t.id)
                .collect();
            results.retain(|t| hits.contains(&t.id));
        }

        Ok(results)
    }

    /// Previous and next tutorials around `slug` in the full listing.
    pub async fn neighbors(&self, slug: &str) -> Neighbors {
        let all = self.all().await;
        let Some(index) = all.iter().position(|t| t.slug == slug) else {
            return Neighbors::default();
        };

        Neighbors {
            previous: index.checked_sub(1).and_then(|i| all.get(i)).cloned(),
            next: all.get(index + 1).cloned(),
        }
    }
}
