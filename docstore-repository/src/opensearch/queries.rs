//! OpenSearch request bodies.
//!
//! This module provides functions to build the JSON bodies sent by the
//! OpenSearch client. Query bodies supplied by callers are never rewritten.

use docstore_shared::Document;
use serde_json::{json, Value};

use crate::types::BulkUpdate;

/// Build a query matching every document of an index.
pub fn match_all_query() -> Value {
    json!({
        "query": {
            "match_all": {}
        }
    })
}

/// Build a partial-update body.
pub fn update_body(partial: &Document) -> Value {
    json!({ "doc": partial })
}

/// Build the body that fetches the next batch of a scroll cursor.
pub fn scroll_body(scroll_id: &str, keep_alive: &str) -> Value {
    json!({
        "scroll": keep_alive,
        "scroll_id": scroll_id
    })
}

/// Build the body that releases a scroll cursor.
pub fn clear_scroll_body(scroll_id: &str) -> Value {
    json!({ "scroll_id": [scroll_id] })
}

/// Build the NDJSON lines of a bulk update request.
///
/// Each update becomes an action line followed by its partial document. The
/// partial document asks for the updated `_source` so the response carries
/// the stored body of every updated document.
pub fn bulk_update_lines(updates: &[BulkUpdate]) -> Vec<Value> {
    let mut lines = Vec::with_capacity(updates.len() * 2);

    for update in updates {
        lines.push(json!({ "update": { "_id": update.id } }));
        lines.push(json!({
            "doc": update.doc,
            "_source": true
        }));
    }

    lines
}
