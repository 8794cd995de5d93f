//! Sequential demo workflow.
//!
//! Drives the fixed operation sequence against the search store. The only
//! concurrent piece is the asynchronous insert, dispatched on a spawned
//! task; its completion arrives over a oneshot channel and is awaited with
//! a bounded timeout before the bulk outcome is validated, so a lost
//! completion can never stall the sequence.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{error, info, warn};

use diary_search_repository::{IndexSettings, OperationOutcome, SearchStore, SearchStoreError};
use diary_search_shared::Note;

use crate::errors::WorkflowError;

/// Field the demo searches on.
pub const SEARCH_FIELD: &str = "note";

/// Term the demo searches for.
pub const SEARCH_TERM: &str = "see";

/// Configuration for the demo workflow.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Index settings used for the create step.
    pub index_settings: IndexSettings,
    /// Upper bound on waiting for the asynchronous insert to complete.
    pub async_completion_timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            index_settings: IndexSettings::default(),
            async_completion_timeout: Duration::from_secs(2),
        }
    }
}

/// What the workflow observed across the sequence.
#[derive(Debug, Default)]
pub struct WorkflowReport {
    /// The synchronously inserted note. Its id stays unset: the
    /// synchronous path does not read the assigned id back.
    pub sync_note: Option<Note>,
    /// The asynchronously inserted note, id back-filled when the
    /// completion signal arrived in time.
    pub async_note: Option<Note>,
    /// Number of per-item outcomes in the bulk response.
    pub bulk_items: usize,
    /// Notes returned by the search step.
    pub hits: Vec<Note>,
}

/// The sequential demo workflow.
pub struct DemoWorkflow {
    store: Arc<dyn SearchStore>,
    config: WorkflowConfig,
}

impl DemoWorkflow {
    /// Create a workflow over the given store with default configuration.
    pub fn new(store: Arc<dyn SearchStore>) -> Self {
        Self {
            store,
            config: WorkflowConfig::default(),
        }
    }

    /// Create a workflow with custom configuration.
    pub fn with_config(store: Arc<dyn SearchStore>, config: WorkflowConfig) -> Self {
        Self { store, config }
    }

    /// Run the full sequence.
    ///
    /// Operations run in a fixed order with no branching except outcome
    /// validation; the first invalid outcome stops the sequence. Prior
    /// successful steps are not rolled back.
    pub async fn run(&self) -> Result<WorkflowReport, WorkflowError> {
        let mut report = WorkflowReport::default();

        info!(
            shards = self.config.index_settings.shards,
            replicas = self.config.index_settings.replicas,
            "Creating index"
        );
        let outcome = self.store.create_index(&self.config.index_settings).await?;
        Self::validate("create_index", outcome)?;

        // Blocking insert. The assigned id is not read back.
        let note1 = Note::timestamped("User1", "Note1: do u see this");
        info!(%note1, "Inserting a single document");
        let outcome = self.store.index_note(&note1).await?;
        Self::validate("index_note", outcome)?;
        report.sync_note = Some(note1);

        // Async insert: the main sequence keeps going while the store
        // acknowledges out of band.
        let note2 = Note::timestamped("User2", "Note2: do u see this");
        info!(%note2, "Inserting a single document asynchronously");
        let completion = self.spawn_async_insert(note2.clone());

        // Bulk insert of two notes in one request.
        let note3 = Note::timestamped("User3", "Note3: do u see this");
        let note4 = Note::timestamped("User4", "Note4: do u see this");
        info!(%note3, %note4, "Inserting two documents using the bulk API");
        let bulk_outcome = self.store.bulk_index_notes(&[note3, note4]).await?;

        // Let the async insert settle before validating the bulk outcome.
        report.async_note = Some(self.await_async_insert(note2, completion).await);

        let bulk_outcome = Self::validate("bulk_index_notes", bulk_outcome)?;
        report.bulk_items = bulk_outcome.bulk_items().len();
        info!(items = report.bulk_items, "Bulk insert acknowledged");

        info!(field = SEARCH_FIELD, term = SEARCH_TERM, "Querying index");
        let outcome = self.store.search_notes(SEARCH_FIELD, SEARCH_TERM).await?;
        let outcome = Self::validate("search_notes", outcome)?;
        report.hits = outcome.hits()?;
        for hit in &report.hits {
            info!(%hit, "Search hit");
        }

        info!("Deleting index");
        let outcome = self.store.delete_index().await?;
        Self::validate("delete_index", outcome)?;

        Ok(report)
    }

    /// Dispatch an insert on a background task.
    ///
    /// The outcome is delivered through the returned channel once the store
    /// acknowledges the insert.
    fn spawn_async_insert(
        &self,
        note: Note,
    ) -> oneshot::Receiver<Result<OperationOutcome, SearchStoreError>> {
        let (tx, rx) = oneshot::channel();
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let result = store.index_note(&note).await;
            // Receiver may have given up waiting.
            let _ = tx.send(result);
        });
        rx
    }

    /// Await the async-insert completion and back-fill the assigned id.
    ///
    /// A failed insert or a completion that never arrives within the
    /// timeout is recorded as a warning and leaves the id unset; the main
    /// sequence is never failed from here.
    async fn await_async_insert(
        &self,
        mut note: Note,
        completion: oneshot::Receiver<Result<OperationOutcome, SearchStoreError>>,
    ) -> Note {
        match tokio::time::timeout(self.config.async_completion_timeout, completion).await {
            Ok(Ok(Ok(outcome))) if outcome.success => {
                note.id = outcome.document_id().map(str::to_string);
                info!(id = ?note.id, "Asynchronous insert completed");
            }
            Ok(Ok(Ok(outcome))) => {
                warn!(
                    status = outcome.status,
                    reason = outcome.reason.as_deref().unwrap_or("unknown"),
                    "Asynchronous insert reported failure"
                );
            }
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "Asynchronous insert failed");
            }
            Ok(Err(_)) => {
                warn!("Asynchronous insert task dropped its completion channel");
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.async_completion_timeout.as_millis() as u64,
                    "Asynchronous insert did not complete in time"
                );
            }
        }
        note
    }

    /// Shared validation rule: an outcome is valid iff the store reported
    /// success. Invalid outcomes are logged with the full diagnostic
    /// payload and stop the sequence.
    fn validate(
        operation: &'static str,
        outcome: OperationOutcome,
    ) -> Result<OperationOutcome, WorkflowError> {
        if outcome.success {
            return Ok(outcome);
        }

        error!(
            operation,
            status = outcome.status,
            reason = outcome.reason.as_deref().unwrap_or("unknown"),
            payload = %outcome.pretty_payload(),
            "Operation failed"
        );
        Err(WorkflowError::OperationFailed { operation, outcome })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;

    /// Behavior of the fake store's second (asynchronous) insert.
    enum AsyncInsert {
        Complete(OperationOutcome),
        CompleteAfter(Duration, OperationOutcome),
        Never,
        Fail(OperationOutcome),
    }

    /// Scripted in-memory store: records calls, reflects indexed notes
    /// back as search hits, and returns programmed outcomes.
    struct FakeStore {
        calls: Mutex<Vec<&'static str>>,
        indexed: Mutex<Vec<Note>>,
        index_calls: AtomicUsize,
        create_outcome: OperationOutcome,
        sync_insert_outcome: OperationOutcome,
        async_insert: AsyncInsert,
        bulk_outcome: Option<OperationOutcome>,
        delete_outcome: OperationOutcome,
    }

    impl FakeStore {
        fn success() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                indexed: Mutex::new(Vec::new()),
                index_calls: AtomicUsize::new(0),
                create_outcome: OperationOutcome::ok(200, json!({ "acknowledged": true })),
                sync_insert_outcome: OperationOutcome::ok(
                    201,
                    json!({ "_id": "abc123", "result": "created" }),
                ),
                async_insert: AsyncInsert::Complete(OperationOutcome::ok(
                    201,
                    json!({ "_id": "xyz789", "result": "created" }),
                )),
                bulk_outcome: None,
                delete_outcome: OperationOutcome::ok(200, json!({ "acknowledged": true })),
            }
        }

        fn with_create(mut self, outcome: OperationOutcome) -> Self {
            self.create_outcome = outcome;
            self
        }

        fn with_async_insert(mut self, behavior: AsyncInsert) -> Self {
            self.async_insert = behavior;
            self
        }

        fn with_bulk(mut self, outcome: OperationOutcome) -> Self {
            self.bulk_outcome = Some(outcome);
            self
        }

        fn with_delete(mut self, outcome: OperationOutcome) -> Self {
            self.delete_outcome = outcome;
            self
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn call_count(&self, call: &'static str) -> usize {
            self.calls().iter().filter(|c| **c == call).count()
        }
    }

    #[async_trait]
    impl SearchStore for FakeStore {
        async fn create_index(
            &self,
            _settings: &IndexSettings,
        ) -> Result<OperationOutcome, SearchStoreError> {
            self.record("create_index");
            Ok(self.create_outcome.clone())
        }

        async fn index_note(&self, note: &Note) -> Result<OperationOutcome, SearchStoreError> {
            self.record("index_note");
            let call = self.index_calls.fetch_add(1, Ordering::SeqCst);

            // First call is the blocking insert, later calls take the
            // scripted asynchronous behavior.
            if call == 0 {
                self.indexed.lock().unwrap().push(note.clone());
                return Ok(self.sync_insert_outcome.clone());
            }

            match &self.async_insert {
                AsyncInsert::Complete(outcome) => {
                    self.indexed.lock().unwrap().push(note.clone());
                    Ok(outcome.clone())
                }
                AsyncInsert::CompleteAfter(delay, outcome) => {
                    tokio::time::sleep(*delay).await;
                    self.indexed.lock().unwrap().push(note.clone());
                    Ok(outcome.clone())
                }
                AsyncInsert::Never => std::future::pending().await,
                AsyncInsert::Fail(outcome) => Ok(outcome.clone()),
            }
        }

        async fn bulk_index_notes(
            &self,
            notes: &[Note],
        ) -> Result<OperationOutcome, SearchStoreError> {
            self.record("bulk_index_notes");
            if let Some(outcome) = &self.bulk_outcome {
                return Ok(outcome.clone());
            }

            self.indexed.lock().unwrap().extend_from_slice(notes);
            let items: Vec<Value> = notes
                .iter()
                .enumerate()
                .map(|(i, _)| json!({ "index": { "_id": format!("bulk-{}", i), "status": 201 } }))
                .collect();
            Ok(OperationOutcome::ok(
                200,
                json!({ "errors": false, "items": items }),
            ))
        }

        async fn search_notes(
            &self,
            _field: &str,
            _value: &str,
        ) -> Result<OperationOutcome, SearchStoreError> {
            self.record("search_notes");
            let indexed = self.indexed.lock().unwrap();
            let hits: Vec<Value> = indexed
                .iter()
                .enumerate()
                .map(|(i, note)| {
                    json!({
                        "_id": format!("doc-{}", i),
                        "_source": { "author": note.author, "note": note.note }
                    })
                })
                .collect();
            Ok(OperationOutcome::ok(200, json!({ "hits": { "hits": hits } })))
        }

        async fn delete_index(&self) -> Result<OperationOutcome, SearchStoreError> {
            self.record("delete_index");
            Ok(self.delete_outcome.clone())
        }
    }

    fn workflow(store: Arc<FakeStore>) -> DemoWorkflow {
        DemoWorkflow::new(store)
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_sequence_success() {
        let store = Arc::new(FakeStore::success());
        let report = workflow(store.clone()).run().await.unwrap();

        // The synchronous path never reads the assigned id back.
        assert!(report.sync_note.unwrap().id.is_none());
        // The asynchronous completion back-fills the id.
        assert_eq!(report.async_note.unwrap().id.as_deref(), Some("xyz789"));
        assert_eq!(report.bulk_items, 2);

        assert_eq!(store.call_count("create_index"), 1);
        assert_eq!(store.call_count("index_note"), 2);
        assert_eq!(store.call_count("bulk_index_notes"), 1);
        assert_eq!(store.call_count("search_notes"), 1);
        assert_eq!(store.call_count("delete_index"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_indexed_notes_come_back_from_search() {
        let store = Arc::new(FakeStore::success());
        let report = workflow(store).run().await.unwrap();

        // All four inserts are reflected back as hits with identical
        // author and note fields. The async insert lands whenever its task
        // runs, so compare without relying on order.
        assert_eq!(report.hits.len(), 4);
        let mut authors: Vec<&str> = report.hits.iter().map(|n| n.author.as_str()).collect();
        authors.sort_unstable();
        assert_eq!(authors, vec!["User1", "User2", "User3", "User4"]);
        for hit in &report.hits {
            assert!(hit.note.contains("do u see this"));
            assert!(hit.id.is_some());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_failure_stops_sequence() {
        let store = Arc::new(FakeStore::success().with_create(OperationOutcome::failed(
            400,
            "index already exists",
            json!({ "error": { "reason": "index already exists" } }),
        )));

        let err = workflow(store.clone()).run().await.unwrap_err();

        match &err {
            WorkflowError::OperationFailed { operation, outcome } => {
                assert_eq!(*operation, "create_index");
                assert_eq!(outcome.status, 400);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(err.exit_code(), 400);
        // Nothing past the failing step runs.
        assert_eq!(store.calls(), vec!["create_index"]);
    }

    #[test]
    fn test_success_outcome_passes_through_unaltered() {
        let payload = json!({ "acknowledged": true, "marker": "untouched" });
        let outcome = OperationOutcome::ok(200, payload.clone());

        let validated = DemoWorkflow::validate("create_index", outcome).unwrap();

        assert!(validated.success);
        assert_eq!(validated.payload, payload);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_async_completion_backfills_id() {
        let store = Arc::new(FakeStore::success().with_async_insert(
            AsyncInsert::CompleteAfter(
                Duration::from_millis(100),
                OperationOutcome::ok(201, json!({ "_id": "xyz789" })),
            ),
        ));

        let report = workflow(store).run().await.unwrap();

        assert_eq!(report.async_note.unwrap().id.as_deref(), Some("xyz789"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_completion_never_fires() {
        let store = Arc::new(FakeStore::success().with_async_insert(AsyncInsert::Never));

        let report = workflow(store.clone()).run().await.unwrap();

        // The id stays unset and the sequence still completes.
        assert!(report.async_note.unwrap().id.is_none());
        assert_eq!(store.call_count("delete_index"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_insert_failure_is_non_fatal() {
        let store = Arc::new(FakeStore::success().with_async_insert(AsyncInsert::Fail(
            OperationOutcome::failed(503, "unavailable", json!({})),
        )));

        let report = workflow(store).run().await.unwrap();

        assert!(report.async_note.unwrap().id.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bulk_failure_maps_status_to_exit_code() {
        let store = Arc::new(FakeStore::success().with_bulk(OperationOutcome::failed(
            500,
            "bulk response reported item errors",
            json!({ "errors": true, "items": [] }),
        )));

        let err = workflow(store.clone()).run().await.unwrap_err();

        assert_eq!(err.exit_code(), 500);
        assert_eq!(store.call_count("search_notes"), 0);
        assert_eq!(store.call_count("delete_index"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_missing_index_maps_status_to_exit_code() {
        let store = Arc::new(FakeStore::success().with_delete(OperationOutcome::failed(
            404,
            "no such index",
            json!({ "error": { "reason": "no such index [diary]" } }),
        )));

        let err = workflow(store).run().await.unwrap_err();

        match &err {
            WorkflowError::OperationFailed { operation, .. } => {
                assert_eq!(*operation, "delete_index");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(err.exit_code(), 404);
    }
}
