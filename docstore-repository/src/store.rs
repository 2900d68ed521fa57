//! Document store gateway.
//!
//! This module provides the main entry point for application code: create,
//! read, update and delete documents, run queries, and walk or update whole
//! indices through a scroll cursor. Every operation goes to the engine; the
//! store keeps no state of its own.

use docstore_shared::{
    now_timestamp, stamp_created, stamp_updated, Document, DocumentCollection, Lookup,
    StatusMessage, DOCUMENT_ID, HIT_ID,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::DocumentStoreConfig;
use crate::errors::{DocumentStoreError, SearchError};
use crate::interfaces::SearchEngine;
use crate::opensearch::match_all_query;
use crate::scroll::ScrollCursor;
use crate::types::{BulkUpdate, SearchOptions, UpdateReceipt};

/// The main client for reading and writing documents.
///
/// Cheap to share: wrap it in an `Arc` or clone the engine handle into
/// several stores.
pub struct DocumentStore {
    engine: Arc<dyn SearchEngine>,
    config: DocumentStoreConfig,
}

impl DocumentStore {
    /// Create a new DocumentStore with default configuration.
    pub fn new(engine: Arc<dyn SearchEngine>) -> Self {
        Self {
            engine,
            config: DocumentStoreConfig::default(),
        }
    }

    /// Create a new DocumentStore with custom configuration.
    pub fn with_config(engine: Arc<dyn SearchEngine>, config: DocumentStoreConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &DocumentStoreConfig {
        &self.config
    }

    fn validate_index(index: &str) -> Result<(), DocumentStoreError> {
        if index.trim().is_empty() {
            return Err(DocumentStoreError::validation("index name is required"));
        }
        Ok(())
    }

    fn validate_id(id: &str) -> Result<(), DocumentStoreError> {
        if id.trim().is_empty() {
            return Err(DocumentStoreError::validation("document id is required"));
        }
        Ok(())
    }

    /// Check a scroll batch size against the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), DocumentStoreError> {
        if size == 0 {
            return Err(DocumentStoreError::validation(
                "batch size must be greater than zero",
            ));
        }
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(DocumentStoreError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Create a document, creating its index first if it does not exist.
    ///
    /// The document is stamped with `created_at` and `updated_at`, indexed,
    /// then written back with the engine-assigned id under `id`. Returns the
    /// final stored form.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let doc = json!({"name": "sushant", "age": 28}).as_object().cloned().unwrap();
    /// let stored = store.create("dummy", doc).await?;
    /// assert!(stored.contains_key("id"));
    /// ```
    #[instrument(skip(self, document))]
    pub async fn create(
        &self,
        index: &str,
        mut document: Document,
    ) -> Result<Document, DocumentStoreError> {
        Self::validate_index(index)?;

        if !self.engine.index_exists(index).await? {
            self.engine.create_index(index).await?;
            info!(index = %index, "Index created on first write");
        }

        let stamp = now_timestamp();
        stamp_created(&mut document, &stamp);

        let id = self.engine.index_document(index, &document).await?;
        debug!(index = %index, id = %id, "Document indexed");

        let mut stored = self
            .get_by_id(index, &id)
            .await?
            .found()
            .ok_or_else(|| DocumentStoreError::missing_document(index, &id))?;
        stored.insert(DOCUMENT_ID.to_string(), Value::String(id.clone()));

        let receipt = self
            .update_stamped(index, &id, stored, &stamp)
            .await?
            .found()
            .ok_or_else(|| DocumentStoreError::missing_document(index, &id))?;

        self.get_by_id(index, &receipt.id)
            .await?
            .found()
            .ok_or_else(|| DocumentStoreError::missing_document(index, &receipt.id))
    }

    /// Fetch a document body by id.
    ///
    /// Returns `Lookup::Absent` when the index or the document does not exist.
    #[instrument(skip(self))]
    pub async fn get_by_id(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Lookup<Document>, DocumentStoreError> {
        Self::validate_index(index)?;
        Self::validate_id(id)?;

        if !self.engine.index_exists(index).await? {
            warn!(index = %index, "Index does not exist");
            return Ok(Lookup::Absent(StatusMessage::index_missing(index)));
        }

        match self.engine.get_document(index, id).await {
            Ok(document) => Ok(Lookup::Found(document)),
            Err(SearchError::NotFound(_)) => {
                warn!(index = %index, id = %id, "Document does not exist");
                Ok(Lookup::Absent(StatusMessage::id_missing(id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Merge `partial` into a document, overwriting `updated_at`.
    ///
    /// Returns `Lookup::Absent` when the index or the document does not exist.
    #[instrument(skip(self, partial))]
    pub async fn update_by_id(
        &self,
        index: &str,
        id: &str,
        partial: Document,
    ) -> Result<Lookup<UpdateReceipt>, DocumentStoreError> {
        self.update_stamped(index, id, partial, &now_timestamp())
            .await
    }

    async fn update_stamped(
        &self,
        index: &str,
        id: &str,
        mut partial: Document,
        stamp: &str,
    ) -> Result<Lookup<UpdateReceipt>, DocumentStoreError> {
        Self::validate_index(index)?;
        Self::validate_id(id)?;

        if !self.engine.index_exists(index).await? {
            warn!(index = %index, "Index does not exist");
            return Ok(Lookup::Absent(StatusMessage::index_missing(index)));
        }

        stamp_updated(&mut partial, stamp);

        match self.engine.update_document(index, id, &partial).await {
            Ok(receipt) => Ok(Lookup::Found(receipt)),
            Err(SearchError::NotFound(_)) => {
                warn!(index = %index, id = %id, "Document does not exist");
                Ok(Lookup::Absent(StatusMessage::id_missing(id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a single document.
    ///
    /// An absent index or id yields a failed status rather than an error.
    #[instrument(skip(self))]
    pub async fn delete_by_id(
        &self,
        index: &str,
        id: &str,
    ) -> Result<StatusMessage, DocumentStoreError> {
        Self::validate_index(index)?;
        Self::validate_id(id)?;

        if !self.engine.index_exists(index).await? {
            warn!(index = %index, "Index does not exist");
            return Ok(StatusMessage::already_deleted(index));
        }

        match self.engine.delete_document(index, id).await {
            Ok(()) => Ok(StatusMessage::document_deleted(index, id)),
            Err(SearchError::NotFound(_)) => {
                warn!(index = %index, id = %id, "Document does not exist");
                Ok(StatusMessage::id_missing(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an index and all of its documents.
    #[instrument(skip(self))]
    pub async fn delete_index(&self, index: &str) -> Result<StatusMessage, DocumentStoreError> {
        Self::validate_index(index)?;

        if !self.engine.index_exists(index).await? {
            warn!(index = %index, "Index does not exist");
            return Ok(StatusMessage::already_deleted(index));
        }

        self.engine.delete_index(index).await?;
        info!(index = %index, "Index deleted");
        Ok(StatusMessage::index_deleted(index))
    }

    /// Run a query body verbatim and return the matching documents.
    ///
    /// Each body carries its id under `_id`.
    #[instrument(skip(self, query))]
    pub async fn get_by_query(
        &self,
        index: &str,
        query: &Value,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        Self::validate_index(index)?;

        let page = self
            .engine
            .search(index, query, &SearchOptions::new())
            .await?;

        Ok(page.into_documents())
    }

    /// Return the documents of an index with a match-all query.
    ///
    /// `size` caps the number of hits; the engine default applies when `None`.
    #[instrument(skip(self))]
    pub async fn get_all(
        &self,
        index: &str,
        size: Option<usize>,
    ) -> Result<DocumentCollection, DocumentStoreError> {
        Self::validate_index(index)?;

        let options = match size {
            Some(size) => SearchOptions::new().with_size(size),
            None => SearchOptions::new(),
        };

        let page = self
            .engine
            .search(index, &match_all_query(), &options)
            .await?;

        Ok(DocumentCollection::new(page.into_documents()))
    }

    /// Read every document of an index through a scroll cursor.
    ///
    /// Documents are returned in engine order, each with its id under `_id`.
    #[instrument(skip(self))]
    pub async fn get_all_via_scroll(
        &self,
        index: &str,
        batch_size: usize,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        Self::validate_index(index)?;
        self.validate_batch_size(batch_size)?;

        let mut cursor = ScrollCursor::new(
            self.engine.as_ref(),
            index,
            batch_size,
            &self.config.scroll_keep_alive,
        );

        let mut documents = Vec::new();
        while let Some(hits) = cursor.next_batch().await? {
            documents.extend(hits.into_iter().map(|hit| hit.into_document()));
        }

        info!(
            index = %index,
            count = documents.len(),
            batches = cursor.batches(),
            "Scroll read completed"
        );
        Ok(documents)
    }

    /// Merge `fields` into every document of an index.
    ///
    /// Walks the index with a scroll cursor of `bulk_batch_size` documents and
    /// sends one bulk request per batch, refreshed immediately. Returns the
    /// updated bodies reported by the engine. Items the engine reports without
    /// an `update` entry are skipped; per-item errors are not inspected, so a
    /// failed item is carried as its raw `update` entry.
    #[instrument(skip(self, fields))]
    pub async fn bulk_update_all(
        &self,
        index: &str,
        mut fields: Document,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        Self::validate_index(index)?;
        let batch_size = self.config.bulk_batch_size;
        self.validate_batch_size(batch_size)?;

        stamp_updated(&mut fields, &now_timestamp());

        let mut cursor = ScrollCursor::new(
            self.engine.as_ref(),
            index,
            batch_size,
            &self.config.scroll_keep_alive,
        );

        let mut updated = Vec::new();
        while let Some(hits) = cursor.next_batch().await? {
            let updates: Vec<BulkUpdate> = hits
                .into_iter()
                .map(|hit| BulkUpdate::new(hit.id, fields.clone()))
                .collect();

            let items = self.engine.bulk_update(index, &updates, true).await?;
            debug!(
                index = %index,
                requested = updates.len(),
                items = items.len(),
                "Bulk batch applied"
            );

            updated.extend(items.into_iter().filter_map(updated_document));
        }

        info!(
            index = %index,
            count = updated.len(),
            batches = cursor.batches(),
            "Bulk update completed"
        );
        Ok(updated)
    }

    /// Check if the underlying engine is reachable and healthy.
    pub async fn health_check(&self) -> Result<bool, DocumentStoreError> {
        Ok(self.engine.health_check().await?)
    }
}

/// Extract the updated body from one bulk response item.
///
/// Prefers the `_source` the engine returns under `get`, with `_id` injected;
/// falls back to the raw `update` entry.
fn updated_document(item: Value) -> Option<Document> {
    let Value::Object(mut item) = item else {
        return None;
    };
    let Value::Object(update) = item.remove("update")? else {
        return None;
    };

    let source = update
        .get("get")
        .and_then(|get| get.get("_source"))
        .and_then(Value::as_object)
        .cloned();

    match source {
        Some(mut source) => {
            if let Some(id) = update.get(HIT_ID) {
                source.insert(HIT_ID.to_string(), id.clone());
            }
            Some(source)
        }
        None => Some(update),
    }
}
