use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use opencrochet_api::config::ServerConfig;
use opencrochet_api::router::build_app_router;
use opencrochet_api::state::AppState;
use opencrochet_core::catalog::Catalog;
use opencrochet_core::seed::default_tutorials;
use opencrochet_core::store::{InMemoryStore, TutorialStore};
use tower::ServiceExt;

/// Multipart boundary used by [`post_csv`].
const BOUNDARY: &str = "----opencrochet-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 64 * 1024,
        seed_fallback: false,
    }
}

/// Build the full application router over `catalog`, with the same
/// middleware stack production uses.
pub fn build_app(catalog: Catalog) -> Router {
    let config = test_config();
    let state = AppState::new(catalog, config.clone());
    build_app_router(state, &config)
}

/// The application over an in-memory store holding the seed tutorials.
/// Returns the store too so tests can inspect writes.
pub fn build_test_app() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new(default_tutorials()));
    let catalog = Catalog::new(Arc::clone(&store) as Arc<dyn TutorialStore>);
    (build_app(catalog), store)
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a multipart form with a single `field` part named `file_name`.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    field: &str,
    file_name: &str,
    contents: &str,
) -> Response<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\
         \r\n\
         {contents}\r\n\
         --{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a CSV document to the import endpoint.
pub async fn post_csv(app: Router, file_name: &str, contents: &str) -> Response<Body> {
    post_multipart(app, "/api/v1/imports", "file", file_name, contents).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
