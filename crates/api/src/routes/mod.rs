pub mod health;
pub mod imports;
pub mod tutorials;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /tutorials                 filtered listing (?category=&tag=&search=)
/// /tutorials/{slug}          detail with neighbours
/// /categories                distinct categories in use
/// /tags                      distinct tags in use
/// /imports                   CSV upload (POST, multipart)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(tutorials::router())
        .nest("/imports", imports::router(config.max_upload_bytes))
}
