//! Error types for the document store repository.

mod search_error;
mod store_error;

pub use search_error::SearchError;
pub use store_error::DocumentStoreError;
