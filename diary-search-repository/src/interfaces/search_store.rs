//! Search store trait definition.
//!
//! This module defines the abstract interface over the remote document
//! store, allowing for different backend implementations (OpenSearch, a
//! test fake, etc.).

use async_trait::async_trait;

use crate::errors::SearchStoreError;
use crate::types::{IndexSettings, OperationOutcome};
use diary_search_shared::Note;

/// Abstract interface for the document store.
///
/// Every operation is a single request/response round trip returning an
/// [`OperationOutcome`]; a `SearchStoreError` is reserved for transport
/// failures that produced no response at all.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async
/// tasks.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Create the index with the given shard and replica settings.
    ///
    /// # Returns
    ///
    /// * `Ok(OperationOutcome)` - The store's response, success flag set
    ///   from the reported status
    /// * `Err(SearchStoreError)` - If the request could not be executed
    async fn create_index(
        &self,
        settings: &IndexSettings,
    ) -> Result<OperationOutcome, SearchStoreError>;

    /// Index a single note, blocking until the store acknowledges it.
    ///
    /// The outcome payload carries the store-assigned document identifier.
    async fn index_note(&self, note: &Note) -> Result<OperationOutcome, SearchStoreError>;

    /// Index a batch of notes in one bulk request.
    ///
    /// The outcome is successful only if the store accepted the request and
    /// no per-item outcome reported an error; the per-item outcomes remain
    /// available in the payload.
    async fn bulk_index_notes(&self, notes: &[Note])
        -> Result<OperationOutcome, SearchStoreError>;

    /// Run a term query matching `value` in `field` against the index.
    ///
    /// On success the outcome's hit list deserializes back into notes.
    async fn search_notes(
        &self,
        field: &str,
        value: &str,
    ) -> Result<OperationOutcome, SearchStoreError>;

    /// Delete the index.
    async fn delete_index(&self) -> Result<OperationOutcome, SearchStoreError>;
}
