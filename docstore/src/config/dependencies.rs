//! Dependency initialization and wiring for the document store.

use std::sync::Arc;
use tracing::info;

use crate::config::AppSettings;
use crate::AppError;
use docstore_repository::{DocumentStore, OpenSearchClient, SearchEngine};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The gateway, backed by the one shared engine client.
    pub store: DocumentStore,
}

impl Dependencies {
    /// Build the engine client once and verify the cluster is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If initialization fails
    pub async fn new(settings: &AppSettings) -> Result<Self, AppError> {
        info!(url = %settings.connection.url, "Initializing dependencies");

        let search_client = OpenSearchClient::new(&settings.connection)
            .await
            .map_err(|e| AppError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        // Verify the cluster is reachable
        let healthy = search_client.health_check().await?;

        if !healthy {
            return Err(AppError::config("Search engine cluster is unhealthy"));
        }

        info!("Search engine connection verified");

        let store = DocumentStore::with_config(Arc::new(search_client), settings.store.clone());

        Ok(Self { store })
    }
}
