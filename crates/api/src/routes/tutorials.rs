//! Route definitions for catalog reads.

use axum::routing::get;
use axum::Router;

use crate::handlers::tutorials;
use crate::state::AppState;

/// Catalog routes, merged at the `/api/v1` root.
///
/// ```text
/// GET /tutorials          -> list_tutorials
/// GET /tutorials/{slug}   -> get_tutorial
/// GET /categories         -> list_categories
/// GET /tags               -> list_tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tutorials", get(tutorials::list_tutorials))
        .route("/tutorials/{slug}", get(tutorials::get_tutorial))
        .route("/categories", get(tutorials::list_categories))
        .route("/tags", get(tutorials::list_tags))
}
