//! Handlers for catalog reads: filtered listing, detail, and the distinct
//! category and tag lists that drive the filter controls.
//!
//! Store failures never surface here; [`Catalog`](opencrochet_core::catalog::Catalog)
//! degrades them to fallback data.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use opencrochet_core::category::Difficulty;
use opencrochet_core::error::CoreError;
use opencrochet_core::tutorial::Tutorial;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::ListingParams;
use crate::response::{DataResponse, ListingResponse};
use crate::state::AppState;

/// Slug and title of an adjacent tutorial.
#[derive(Debug, Serialize)]
pub struct TutorialLink {
    pub slug: String,
    pub title: String,
}

impl From<Tutorial> for TutorialLink {
    fn from(t: Tutorial) -> Self {
        Self {
            slug: t.slug,
            title: t.title,
        }
    }
}

/// A single tutorial with its difficulty levels and listing neighbours.
#[derive(Debug, Serialize)]
pub struct TutorialDetail {
    #[serde(flatten)]
    pub tutorial: Tutorial,
    pub difficulties: Vec<Difficulty>,
    pub previous: Option<TutorialLink>,
    pub next: Option<TutorialLink>,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/tutorials
///
/// Tutorials matching every active criterion. The response echoes the
/// canonical query string for the applied filters.
pub async fn list_tutorials(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.to_filter();
    let tutorials = state.catalog.filtered(&filter).await;

    Ok(Json(ListingResponse {
        data: tutorials,
        query: filter.to_query_string(),
    }))
}

/// GET /api/v1/tutorials/{slug}
pub async fn get_tutorial(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tutorial = state
        .catalog
        .by_slug(&slug)
        .await
        .ok_or_else(|| CoreError::NotFound {
            entity: "Tutorial",
            key: slug.clone(),
        })?;

    let neighbors = state.catalog.neighbors(&slug).await;

    Ok(Json(DataResponse {
        data: TutorialDetail {
            difficulties: tutorial.difficulties(),
            tutorial,
            previous: neighbors.previous.map(TutorialLink::from),
            next: neighbors.next.map(TutorialLink::from),
        },
    }))
}

// ---------------------------------------------------------------------------
// Filter options
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.catalog.categories().await;

    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = state.catalog.tags().await;

    Ok(Json(DataResponse { data: tags }))
}
