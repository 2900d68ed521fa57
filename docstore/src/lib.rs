//! # Document Store
//!
//! Entry point and configuration for the document store command line tool.
//!
//! The binary loads connection settings from the environment, builds one
//! shared OpenSearch client, and runs a single gateway operation per
//! invocation.

pub mod cli;
pub mod config;

pub use config::{AppSettings, Dependencies};

use docstore_repository::{DocumentStoreError, SearchError};
use thiserror::Error;

/// Errors that can occur during startup or while running a command.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Command line input could not be used.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Document store error.
    #[error("Store error: {0}")]
    StoreError(#[from] DocumentStoreError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// JSON error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
