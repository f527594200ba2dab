use std::sync::Arc;

use opencrochet_core::catalog::Catalog;
use opencrochet_core::import::ImportPipeline;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Read access to tutorials, with fallback on store failure.
    pub catalog: Catalog,
    /// Single-flight CSV importer writing to the same store.
    pub importer: Arc<ImportPipeline>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire a catalog and an importer over the catalog's store.
    pub fn new(catalog: Catalog, config: ServerConfig) -> Self {
        let importer = ImportPipeline::new(catalog.store()).with_progress(|stage| {
            tracing::info!(stage = %stage, percent = stage.percent(), "Import progress");
        });

        Self {
            catalog,
            importer: Arc::new(importer),
            config: Arc::new(config),
        }
    }
}
