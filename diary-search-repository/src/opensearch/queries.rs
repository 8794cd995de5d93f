//! OpenSearch query builders.

use serde_json::{json, Map, Value};

/// Build a term query matching `value` in `field`.
///
/// Term queries match exact tokens in the inverted index; the demo uses one
/// to find notes whose text contains a fixed token.
pub fn term_query(field: &str, value: &str) -> Value {
    let mut term = Map::new();
    term.insert(field.to_string(), json!({ "value": value }));

    json!({
        "query": {
            "term": term
        }
    })
}
