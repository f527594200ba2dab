//! Import orchestration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use super::{is_csv_file_name, parse, transform, validate, ImportError};
use crate::store::TutorialStore;
use crate::tutorial::Tutorial;

/// The stage an import has reached, with its nominal completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    Parsing,
    Validating,
    Transforming,
    Uploading,
    Complete,
}

impl ImportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parsing => "parsing",
            Self::Validating => "validating",
            Self::Transforming => "transforming",
            Self::Uploading => "uploading",
            Self::Complete => "complete",
        }
    }

    /// Progress percentage reported on entering this stage.
    pub fn percent(&self) -> u8 {
        match self {
            Self::Parsing => 10,
            Self::Validating => 30,
            Self::Transforming => 50,
            Self::Uploading => 70,
            Self::Complete => 100,
        }
    }
}

impl std::fmt::Display for ImportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub imported: usize,
    pub tutorials: Vec<Tutorial>,
}

type ProgressObserver = Box<dyn Fn(ImportStage) + Send + Sync>;

/// Runs CSV imports against a record store, one at a time.
///
/// Concurrent calls are not queued: while an import is in flight any other
/// call fails fast with [`ImportError::InProgress`].
pub struct ImportPipeline {
    store: Arc<dyn TutorialStore>,
    busy: AtomicBool,
    observer: Option<ProgressObserver>,
}

/// Clears the busy flag when an import finishes, however it finishes.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ImportPipeline {
    pub fn new(store: Arc<dyn TutorialStore>) -> Self {
        Self {
            store,
            busy: AtomicBool::new(false),
            observer: None,
        }
    }

    /// Register a callback invoked as each stage starts.
    pub fn with_progress(mut self, observer: impl Fn(ImportStage) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Whether an import is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn enter(&self, stage: ImportStage) {
        tracing::debug!(stage = %stage, percent = stage.percent(), "Import stage");
        if let Some(observer) = &self.observer {
            observer(stage);
        }
    }

    /// Import an uploaded file after checking its name.
    pub async fn run_file(&self, file_name: &str, bytes: &[u8]) -> Result<ImportOutcome, ImportError> {
        if !is_csv_file_name(file_name) {
            return Err(ImportError::InvalidFile(file_name.to_string()));
        }
        self.run(bytes).await
    }

    /// Parse, validate, transform and upload a CSV document.
    ///
    /// Stages run in order with no retry. Nothing is written unless every row
    /// is valid, and the upload itself is all-or-nothing.
    pub async fn run(&self, bytes: &[u8]) -> Result<ImportOutcome, ImportError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Rejected import while another is in flight");
            return Err(ImportError::InProgress);
        }
        let _guard = BusyGuard(&self.busy);

        self.enter(ImportStage::Parsing);
        let rows = parse(bytes)?;
        tracing::info!(rows = rows.len(), "Parsed CSV import");

        self.enter(ImportStage::Validating);
        let errors = validate(&rows);
        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "CSV import rejected by validation");
            return Err(ImportError::Validation(errors));
        }
        if rows.is_empty() {
            return Err(ImportError::Parse("no data rows found".to_string()));
        }

        self.enter(ImportStage::Transforming);
        let taken = self
            .store
            .list_slugs()
            .await
            .map_err(|e| ImportError::Upload(e.to_string()))?;
        let batch = transform(&rows, chrono::Utc::now(), &taken)?;

        self.enter(ImportStage::Uploading);
        let tutorials = self.store.insert_batch(&batch).await.map_err(|e| {
            tracing::error!(error = %e, batch = batch.len(), "Tutorial batch insert failed");
            ImportError::Upload(e.to_string())
        })?;

        self.enter(ImportStage::Complete);
        tracing::info!(imported = tutorials.len(), "CSV import complete");

        Ok(ImportOutcome {
            imported: tutorials.len(),
            tutorials,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::category::Category;
    use crate::seed::default_tutorials;
    use crate::store::{InMemoryStore, StoreError};
    use crate::tutorial::NewTutorial;

    const CSV: &str = "id,title,description,tags,category,difficulty,instructions,materials,image\n\
        1,Basic Beanie,A warm hat,\"Quick,Gift\",Hats,Beginner,Ch 60|Join|Work even,Yarn|Hook,\n\
        2,Cozy Granny Square Blanket,Another granny,Home,Blankets,,Ch 4|Join,Yarn,\n";

    /// A store whose writes always fail.
    struct BrokenStore;

    #[async_trait]
    impl TutorialStore for BrokenStore {
        async fn list_all(&self) -> Result<Vec<Tutorial>, StoreError> {
            Err(StoreError::Backend("offline".into()))
        }
        async fn find_by_slug(&self, _: &str) -> Result<Option<Tutorial>, StoreError> {
            Err(StoreError::Backend("offline".into()))
        }
        async fn list_by_category(&self, _: Category) -> Result<Vec<Tutorial>, StoreError> {
            Err(StoreError::Backend("offline".into()))
        }
        async fn list_by_tag(&self, _: &str) -> Result<Vec<Tutorial>, StoreError> {
            Err(StoreError::Backend("offline".into()))
        }
        async fn search(&self, _: &str) -> Result<Vec<Tutorial>, StoreError> {
            Err(StoreError::Backend("offline".into()))
        }
        async fn list_slugs(&self) -> Result<Vec<String>, StoreError> {
            Ok(vec![])
        }
        async fn insert_batch(&self, _: &[NewTutorial]) -> Result<Vec<Tutorial>, StoreError> {
            Err(StoreError::Backend("insert rejected".into()))
        }
        async fn health_check(&self) -> Result<(), StoreError> {
            Err(StoreError::Backend("offline".into()))
        }
    }

    #[tokio::test]
    async fn imports_valid_csv() {
        let store = Arc::new(InMemoryStore::new(default_tutorials()));
        let pipeline = ImportPipeline::new(store.clone());

        let outcome = pipeline.run(CSV.as_bytes()).await.unwrap();

        assert_eq!(outcome.imported, 2);
        let beanie = &outcome.tutorials[0];
        assert_eq!(beanie.slug, "basic-beanie");
        assert_eq!(beanie.tags, vec!["Quick", "Gift", "Beginner"]);
        // Seed data already holds this slug.
        assert_eq!(outcome.tutorials[1].slug, "cozy-granny-square-blanket-2");
        assert_eq!(store.list_all().await.unwrap().len(), 8);
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn validation_errors_abort_before_upload() {
        let store = Arc::new(InMemoryStore::default());
        let pipeline = ImportPipeline::new(store.clone());
        let csv = "title,description,category,instructions,materials\n\
                   ,No title,Hats,Step,Yarn\n\
                   Good,Fine,Socks,Step,Yarn\n";

        let result = pipeline.run(csv.as_bytes()).await;

        assert_matches!(result, Err(ImportError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].to_string(), "Row 1: Missing required field 'title'");
            assert_eq!(errors[1].to_string(), "Row 2: Invalid category 'Socks'");
        });
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn header_only_file_is_rejected() {
        let pipeline = ImportPipeline::new(Arc::new(InMemoryStore::default()));
        let result = pipeline
            .run(b"title,description,category,instructions,materials\n")
            .await;
        assert_matches!(result, Err(ImportError::Parse(_)));
    }

    #[tokio::test]
    async fn store_rejection_is_an_upload_error() {
        let pipeline = ImportPipeline::new(Arc::new(BrokenStore));
        let result = pipeline.run(CSV.as_bytes()).await;
        assert_matches!(result, Err(ImportError::Upload(msg)) if msg.contains("insert rejected"));
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn non_csv_file_name_is_rejected() {
        let pipeline = ImportPipeline::new(Arc::new(InMemoryStore::default()));
        let result = pipeline.run_file("patterns.xlsx", CSV.as_bytes()).await;
        assert_matches!(result, Err(ImportError::InvalidFile(name)) if name == "patterns.xlsx");
    }

    #[tokio::test]
    async fn progress_is_reported_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let pipeline = ImportPipeline::new(Arc::new(InMemoryStore::default()))
            .with_progress(move |stage| sink.lock().unwrap().push(stage.percent()));

        pipeline.run(CSV.as_bytes()).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![10, 30, 50, 70, 100]);
    }

    #[tokio::test]
    async fn concurrent_import_is_refused() {
        let pipeline = ImportPipeline::new(Arc::new(InMemoryStore::default()));
        pipeline.busy.store(true, Ordering::Release);

        assert_matches!(pipeline.run(CSV.as_bytes()).await, Err(ImportError::InProgress));
        // A refused call must not clear the flag owned by the running import.
        assert!(pipeline.is_busy());
    }
}
