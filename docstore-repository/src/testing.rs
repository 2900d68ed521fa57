//! In-memory `SearchEngine` used by the unit tests.
//!
//! Mirrors the engine behaviour the store relies on: engine-assigned ids,
//! `NotFound` for missing documents, default search size of 10, scroll
//! cursors handing out fixed-size batches, and bulk items shaped like the
//! OpenSearch `_bulk` response.

use async_trait::async_trait;
use docstore_shared::Document;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::SearchError;
use crate::interfaces::SearchEngine;
use crate::types::{BulkUpdate, Hit, SearchOptions, SearchPage, UpdateReceipt};

const DEFAULT_SEARCH_SIZE: usize = 10;

struct Cursor {
    hits: Vec<Hit>,
    position: usize,
    batch_size: usize,
}

#[derive(Default)]
struct EngineState {
    /// Documents per index, in insertion order.
    indices: HashMap<String, Vec<(String, Document)>>,
    cursors: HashMap<String, Cursor>,
    cleared: Vec<String>,
    calls: Vec<&'static str>,
    bulk_refresh: Vec<bool>,
    fail_scroll: bool,
    fail_clear: bool,
    /// Document removed from its index on the next `scroll` call.
    remove_on_scroll: Option<(String, String)>,
}

/// Mock engine for testing
#[derive(Default)]
pub(crate) struct InMemoryEngine {
    state: Mutex<EngineState>,
}

impl InMemoryEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seed an index with documents under generated ids.
    pub(crate) async fn seed(&self, index: &str, documents: Vec<Value>) -> Vec<String> {
        let mut state = self.state.lock().await;
        let stored = state.indices.entry(index.to_string()).or_default();

        documents
            .into_iter()
            .map(|value| {
                let id = Uuid::new_v4().to_string();
                let body = value.as_object().cloned().unwrap_or_default();
                stored.push((id.clone(), body));
                id
            })
            .collect()
    }

    /// Make every `scroll` call fail.
    pub(crate) async fn fail_scrolls(&self) {
        self.state.lock().await.fail_scroll = true;
    }

    /// Make every `clear_scroll` call fail.
    pub(crate) async fn fail_clears(&self) {
        self.state.lock().await.fail_clear = true;
    }

    /// Delete a document as soon as the next scroll batch is fetched.
    pub(crate) async fn remove_on_scroll(&self, index: &str, id: &str) {
        self.state.lock().await.remove_on_scroll = Some((index.to_string(), id.to_string()));
    }

    pub(crate) async fn calls(&self) -> Vec<&'static str> {
        self.state.lock().await.calls.clone()
    }

    pub(crate) async fn cleared_scrolls(&self) -> Vec<String> {
        self.state.lock().await.cleared.clone()
    }

    pub(crate) async fn open_cursors(&self) -> usize {
        self.state.lock().await.cursors.len()
    }

    pub(crate) async fn bulk_refresh_flags(&self) -> Vec<bool> {
        self.state.lock().await.bulk_refresh.clone()
    }

    pub(crate) async fn stored(&self, index: &str) -> Vec<(String, Document)> {
        self.state
            .lock()
            .await
            .indices
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    fn index_missing(index: &str) -> SearchError {
        SearchError::query(format!("index_not_found_exception: no such index [{}]", index))
    }

    /// Supports `match_all` and a single-field `term` query.
    fn matches(query: &Value, document: &Document) -> bool {
        match query.get("query").and_then(|q| q.get("term")).and_then(Value::as_object) {
            Some(term) => term.iter().all(|(field, expected)| {
                let expected = expected.get("value").unwrap_or(expected);
                document.get(field) == Some(expected)
            }),
            None => true,
        }
    }
}

#[async_trait]
impl SearchEngine for InMemoryEngine {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("index_exists");
        Ok(state.indices.contains_key(index))
    }

    async fn create_index(&self, index: &str) -> Result<(), SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("create_index");
        if state.indices.contains_key(index) {
            return Err(SearchError::index_creation(format!(
                "resource_already_exists_exception: [{}]",
                index
            )));
        }
        state.indices.insert(index.to_string(), Vec::new());
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("delete_index");
        state
            .indices
            .remove(index)
            .map(|_| ())
            .ok_or_else(|| Self::index_missing(index))
    }

    async fn index_document(&self, index: &str, body: &Document) -> Result<String, SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("index_document");
        let id = Uuid::new_v4().to_string();
        state
            .indices
            .entry(index.to_string())
            .or_default()
            .push((id.clone(), body.clone()));
        Ok(id)
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<Document, SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("get_document");
        state
            .indices
            .get(index)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(_, body)| body.clone())
            .ok_or_else(|| SearchError::not_found(index, id))
    }

    async fn update_document(
        &self,
        index: &str,
        id: &str,
        partial: &Document,
    ) -> Result<UpdateReceipt, SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("update_document");
        let body = state
            .indices
            .get_mut(index)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id))
            .map(|(_, body)| body)
            .ok_or_else(|| SearchError::not_found(index, id))?;

        for (field, value) in partial {
            body.insert(field.clone(), value.clone());
        }

        Ok(UpdateReceipt {
            id: id.to_string(),
            result: "updated".to_string(),
            version: Some(2),
        })
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("delete_document");
        let docs = state
            .indices
            .get_mut(index)
            .ok_or_else(|| Self::index_missing(index))?;

        let position = docs
            .iter()
            .position(|(doc_id, _)| doc_id == id)
            .ok_or_else(|| SearchError::not_found(index, id))?;
        docs.remove(position);
        Ok(())
    }

    async fn search(
        &self,
        index: &str,
        body: &Value,
        options: &SearchOptions,
    ) -> Result<SearchPage, SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("search");
        let docs = state
            .indices
            .get(index)
            .ok_or_else(|| Self::index_missing(index))?;

        let mut hits: Vec<Hit> = docs
            .iter()
            .filter(|(_, doc)| Self::matches(body, doc))
            .map(|(id, doc)| Hit::new(id.clone(), doc.clone()))
            .collect();

        let size = options.size.unwrap_or(DEFAULT_SEARCH_SIZE);

        if options.scroll.is_none() {
            hits.truncate(size);
            return Ok(SearchPage {
                hits,
                scroll_id: None,
            });
        }

        let first: Vec<Hit> = hits.iter().take(size).cloned().collect();
        let scroll_id = Uuid::new_v4().to_string();
        state.cursors.insert(
            scroll_id.clone(),
            Cursor {
                hits,
                position: first.len(),
                batch_size: size,
            },
        );

        Ok(SearchPage {
            hits: first,
            scroll_id: Some(scroll_id),
        })
    }

    async fn scroll(&self, scroll_id: &str, _keep_alive: &str) -> Result<SearchPage, SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("scroll");
        if state.fail_scroll {
            return Err(SearchError::scroll("Mock failure"));
        }

        if let Some((index, id)) = state.remove_on_scroll.take() {
            if let Some(docs) = state.indices.get_mut(&index) {
                docs.retain(|(doc_id, _)| *doc_id != id);
            }
        }

        let cursor = state
            .cursors
            .get_mut(scroll_id)
            .ok_or_else(|| SearchError::scroll("search_context_missing_exception"))?;

        let end = (cursor.position + cursor.batch_size).min(cursor.hits.len());
        let hits = cursor.hits[cursor.position..end].to_vec();
        cursor.position = end;

        Ok(SearchPage {
            hits,
            scroll_id: Some(scroll_id.to_string()),
        })
    }

    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("clear_scroll");
        if state.fail_clear {
            return Err(SearchError::scroll("Mock failure"));
        }
        state.cursors.remove(scroll_id);
        state.cleared.push(scroll_id.to_string());
        Ok(())
    }

    async fn bulk_update(
        &self,
        index: &str,
        updates: &[BulkUpdate],
        refresh: bool,
    ) -> Result<Vec<Value>, SearchError> {
        let mut state = self.state.lock().await;
        state.calls.push("bulk_update");
        state.bulk_refresh.push(refresh);
        let docs = state
            .indices
            .get_mut(index)
            .ok_or_else(|| Self::index_missing(index))?;

        let items = updates
            .iter()
            .map(|update| match docs.iter_mut().find(|(id, _)| *id == update.id) {
                Some((id, body)) => {
                    for (field, value) in &update.doc {
                        body.insert(field.clone(), value.clone());
                    }
                    json!({
                        "update": {
                            "_index": index,
                            "_id": id,
                            "result": "updated",
                            "status": 200,
                            "get": { "found": true, "_source": body }
                        }
                    })
                }
                None => json!({
                    "update": {
                        "_index": index,
                        "_id": update.id,
                        "status": 404,
                        "error": { "type": "document_missing_exception" }
                    }
                }),
            })
            .collect();

        Ok(items)
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(true)
    }
}
