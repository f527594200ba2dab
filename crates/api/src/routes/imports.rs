//! Route definitions for CSV imports, mounted at `/imports`.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::imports;
use crate::state::AppState;

/// ```text
/// POST /   -> import_csv (multipart, `file` field)
/// ```
///
/// Request bodies larger than `max_upload_bytes` are rejected with 413.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(imports::import_csv))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
