//! OpenSearch implementation of the search engine.
//!
//! This module provides a concrete implementation of `SearchEngine`
//! using OpenSearch (or a compatible Elasticsearch cluster) as the backend.

mod client;
mod connection;
mod queries;
mod responses;

pub use client::OpenSearchClient;
pub use connection::ConnectionSettings;
pub use queries::match_all_query;
