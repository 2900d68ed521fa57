//! Document store error types.
//!
//! This module defines the error types returned by `DocumentStore` operations.
//! An absent index or document is not an error; see `Lookup` and `StatusMessage`.

use thiserror::Error;

use crate::errors::SearchError;

/// Errors that can occur during document store operations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// Validation error (e.g., empty index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Scroll batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// A document written during create could not be read back.
    #[error("Missing document: {0}")]
    MissingDocument(String),

    /// The search engine rejected or failed the request.
    #[error("Engine error: {0}")]
    Engine(#[from] SearchError),
}

impl DocumentStoreError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Create a missing document error.
    pub fn missing_document(index: &str, id: &str) -> Self {
        Self::MissingDocument(format!("index={}, id={}", index, id))
    }
}
