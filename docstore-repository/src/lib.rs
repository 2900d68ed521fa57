//! # Document Store Repository
//!
//! This crate provides the document store gateway and the search engine it is
//! built on: the `SearchEngine` trait, a concrete OpenSearch implementation,
//! and `DocumentStore`, which layers existence checks, timestamping and
//! scroll-driven bulk operations on top.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod scroll;
pub mod store;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::DocumentStoreConfig;
pub use errors::{DocumentStoreError, SearchError};
pub use interfaces::SearchEngine;
pub use opensearch::{ConnectionSettings, OpenSearchClient};
pub use store::DocumentStore;
pub use types::{BulkUpdate, Hit, SearchOptions, SearchPage, UpdateReceipt};
