//! Request and response types exchanged with the search engine.

use docstore_shared::{Document, HIT_ID};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Optional parameters for a search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Number of hits to return (engine default when `None`).
    pub size: Option<usize>,
    /// Keep-alive for a scroll cursor; opens a scroll when set.
    pub scroll: Option<String>,
}

impl SearchOptions {
    /// Plain search, engine default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of hits to return.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Open a scroll cursor kept alive for `keep_alive` between fetches.
    pub fn with_scroll(mut self, keep_alive: impl Into<String>) -> Self {
        self.scroll = Some(keep_alive.into());
        self
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// The engine-assigned document id.
    pub id: String,
    /// The stored document body.
    pub source: Document,
}

impl Hit {
    pub fn new(id: impl Into<String>, source: Document) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }

    /// The document body with its id injected under `_id`.
    pub fn into_document(self) -> Document {
        let mut source = self.source;
        source.insert(HIT_ID.to_string(), Value::String(self.id));
        source
    }
}

/// One page of search or scroll results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// Hits in the order the engine returned them.
    pub hits: Vec<Hit>,
    /// Cursor for the next batch, present when a scroll is open.
    pub scroll_id: Option<String>,
}

impl SearchPage {
    /// Flatten the hits into `_id`-augmented document bodies.
    pub fn into_documents(self) -> Vec<Document> {
        self.hits.into_iter().map(Hit::into_document).collect()
    }
}

/// Acknowledgement of a single-document update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReceipt {
    /// The id of the updated document.
    #[serde(rename = "_id")]
    pub id: String,
    /// Engine outcome, e.g. `updated` or `noop`.
    pub result: String,
    /// Document version after the update.
    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// One (update action, partial document) pair of a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkUpdate {
    /// Id of the document to update.
    pub id: String,
    /// Fields merged into the stored document.
    pub doc: Document,
}

impl BulkUpdate {
    pub fn new(id: impl Into<String>, doc: Document) -> Self {
        Self { id: id.into(), doc }
    }
}
