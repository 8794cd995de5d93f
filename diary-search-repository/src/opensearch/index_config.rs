//! OpenSearch index settings rendering.

use serde_json::{json, Value};

use crate::types::IndexSettings;

/// Render index settings into the create-index request body.
///
/// The demo index relies on dynamic mappings, so the body declares shard
/// and replica counts only.
pub fn settings_body(settings: &IndexSettings) -> Value {
    json!({
        "settings": {
            "number_of_shards": settings.shards,
            "number_of_replicas": settings.replicas
        }
    })
}
