//! Search engine trait definition.
//!
//! This module defines the abstract interface for the engine operations the
//! document store is built on, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, in-memory, etc.).

use async_trait::async_trait;
use docstore_shared::Document;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::{BulkUpdate, SearchOptions, SearchPage, UpdateReceipt};

/// Abstract interface for search engine operations.
///
/// Every method is a single round trip to the engine. Implementations hold no
/// per-call state, so one instance is shared by all callers.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>`. A missing document is reported
/// as `SearchError::NotFound` by `get_document`, `update_document` and
/// `delete_document`.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Create an index with engine defaults.
    async fn create_index(&self, index: &str) -> Result<(), SearchError>;

    /// Delete an index and every document in it.
    async fn delete_index(&self, index: &str) -> Result<(), SearchError>;

    /// Index a new document and return the id the engine assigned to it.
    async fn index_document(&self, index: &str, body: &Document) -> Result<String, SearchError>;

    /// Fetch the stored body of a document.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The `_source` of the document
    /// * `Err(SearchError::NotFound)` - If no document has this id
    /// * `Err(SearchError)` - If the request fails
    async fn get_document(&self, index: &str, id: &str) -> Result<Document, SearchError>;

    /// Merge `partial` into an existing document.
    ///
    /// # Returns
    ///
    /// * `Ok(UpdateReceipt)` - The engine's acknowledgement
    /// * `Err(SearchError::NotFound)` - If no document has this id
    /// * `Err(SearchError)` - If the update fails
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        partial: &Document,
    ) -> Result<UpdateReceipt, SearchError>;

    /// Delete a single document.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The document was deleted
    /// * `Err(SearchError::NotFound)` - If no document has this id
    /// * `Err(SearchError)` - If the request fails
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError>;

    /// Execute a query body verbatim against an index.
    ///
    /// When `options.scroll` is set the engine opens a scroll cursor and the
    /// returned page carries its id.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let body = json!({"query": {"match_all": {}}});
    /// let page = engine.search("dummy", &body, &SearchOptions::new().with_size(50)).await?;
    /// println!("Found {} hits", page.hits.len());
    /// ```
    async fn search(
        &self,
        index: &str,
        body: &Value,
        options: &SearchOptions,
    ) -> Result<SearchPage, SearchError>;

    /// Fetch the next batch of an open scroll cursor.
    async fn scroll(&self, scroll_id: &str, keep_alive: &str) -> Result<SearchPage, SearchError>;

    /// Release an open scroll cursor.
    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchError>;

    /// Submit a bulk request of partial updates.
    ///
    /// Returns the raw `items` array of the bulk response, one entry per
    /// action. Per-item failures are left in the items, not raised.
    async fn bulk_update(
        &self,
        index: &str,
        updates: &[BulkUpdate],
        refresh: bool,
    ) -> Result<Vec<Value>, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
