//! Operation outcome and index settings types.

use serde_json::Value;

use crate::errors::SearchStoreError;
use diary_search_shared::Note;

/// Shard and replica configuration for index creation.
#[derive(Debug, Clone, Copy)]
pub struct IndexSettings {
    /// Number of primary shards.
    pub shards: u32,
    /// Number of replicas per shard.
    pub replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            shards: 3,
            replicas: 1,
        }
    }
}

impl IndexSettings {
    /// Create settings with explicit shard and replica counts.
    pub fn new(shards: u32, replicas: u32) -> Self {
        Self { shards, replicas }
    }
}

/// The result of a single store operation.
///
/// Every operation returns an outcome carrying the success flag, the HTTP
/// status reported by the store, an optional failure reason, and the raw
/// response payload. Callers must check `success` before interpreting the
/// payload.
#[derive(Debug, Clone)]
pub struct OperationOutcome {
    /// Whether the store reported success.
    pub success: bool,
    /// HTTP status code reported by the store.
    pub status: u16,
    /// Failure reason, when the store reported one.
    pub reason: Option<String>,
    /// Raw response payload.
    pub payload: Value,
}

impl OperationOutcome {
    /// Create a successful outcome.
    pub fn ok(status: u16, payload: Value) -> Self {
        Self {
            success: true,
            status,
            reason: None,
            payload,
        }
    }

    /// Create a failed outcome.
    pub fn failed(status: u16, reason: impl Into<String>, payload: Value) -> Self {
        Self {
            success: false,
            status,
            reason: Some(reason.into()),
            payload,
        }
    }

    /// The document identifier the store assigned, if the payload carries
    /// one.
    pub fn document_id(&self) -> Option<&str> {
        self.payload.get("_id").and_then(Value::as_str)
    }

    /// Deserialize the search hits into notes.
    ///
    /// Each hit's `_source` becomes a [`Note`]; the hit's `_id` is carried
    /// over into the note's identifier. An outcome without a hit list
    /// yields an empty vector.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Note>)` - The decoded hits
    /// * `Err(SearchStoreError::ParseError)` - If a hit cannot be decoded
    pub fn hits(&self) -> Result<Vec<Note>, SearchStoreError> {
        let hits = match self.payload.pointer("/hits/hits") {
            Some(Value::Array(hits)) => hits,
            _ => return Ok(Vec::new()),
        };

        hits.iter()
            .map(|hit| {
                let source = hit
                    .get("_source")
                    .ok_or_else(|| SearchStoreError::parse("search hit without _source"))?;
                let mut note: Note = serde_json::from_value(source.clone())
                    .map_err(|e| SearchStoreError::parse(format!("cannot decode hit: {}", e)))?;
                note.id = hit.get("_id").and_then(Value::as_str).map(str::to_string);
                Ok(note)
            })
            .collect()
    }

    /// Per-item outcomes of a bulk response.
    pub fn bulk_items(&self) -> Vec<&Value> {
        match self.payload.get("items") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Pretty-printed payload for failure diagnostics.
    pub fn pretty_payload(&self) -> String {
        serde_json::to_string_pretty(&self.payload).unwrap_or_else(|_| self.payload.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_document_id() {
        let outcome = OperationOutcome::ok(201, json!({ "_id": "abc123", "result": "created" }));

        assert_eq!(outcome.document_id(), Some("abc123"));
    }

    #[test]
    fn test_document_id_missing() {
        let outcome = OperationOutcome::ok(200, json!({ "acknowledged": true }));

        assert!(outcome.document_id().is_none());
    }

    #[test]
    fn test_hits_decodes_notes_with_ids() {
        let outcome = OperationOutcome::ok(
            200,
            json!({
                "hits": {
                    "hits": [
                        { "_id": "1", "_source": { "author": "User1", "note": "do u see this" } },
                        { "_id": "2", "_source": { "author": "User2", "note": "another note" } }
                    ]
                }
            }),
        );

        let notes = outcome.hits().unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id.as_deref(), Some("1"));
        assert_eq!(notes[0].author, "User1");
        assert_eq!(notes[0].note, "do u see this");
        assert_eq!(notes[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_hits_empty_without_hit_list() {
        let outcome = OperationOutcome::ok(200, json!({ "acknowledged": true }));

        assert!(outcome.hits().unwrap().is_empty());
    }

    #[test]
    fn test_hits_rejects_malformed_source() {
        let outcome = OperationOutcome::ok(
            200,
            json!({
                "hits": { "hits": [ { "_id": "1", "_source": { "author": 42 } } ] }
            }),
        );

        assert!(outcome.hits().is_err());
    }

    #[test]
    fn test_bulk_items() {
        let outcome = OperationOutcome::ok(
            200,
            json!({
                "errors": false,
                "items": [
                    { "index": { "_id": "1", "status": 201 } },
                    { "index": { "_id": "2", "status": 201 } }
                ]
            }),
        );

        assert_eq!(outcome.bulk_items().len(), 2);
    }

    #[test]
    fn test_failed_outcome_keeps_reason_and_payload() {
        let payload = json!({ "error": { "reason": "index already exists" } });
        let outcome = OperationOutcome::failed(400, "index already exists", payload.clone());

        assert!(!outcome.success);
        assert_eq!(outcome.status, 400);
        assert_eq!(outcome.reason.as_deref(), Some("index already exists"));
        assert_eq!(outcome.payload, payload);
    }

    #[test]
    fn test_default_index_settings() {
        let settings = IndexSettings::default();

        assert_eq!(settings.shards, 3);
        assert_eq!(settings.replicas, 1);
    }
}
