//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngine`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use docstore_shared::Document;
use opensearch::{
    auth::Credentials,
    cert::CertificateValidation,
    cluster::ClusterHealthParts,
    http::{
        request::JsonBody,
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    params::Refresh,
    BulkParts, ClearScrollParts, DeleteParts, GetParts, IndexParts, OpenSearch, ScrollParts,
    SearchParts, UpdateParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngine;
use crate::opensearch::connection::ConnectionSettings;
use crate::opensearch::queries::{bulk_update_lines, clear_scroll_body, scroll_body, update_body};
use crate::opensearch::responses::{
    parse_bulk_items, parse_cluster_health, parse_get_response, parse_index_response,
    parse_search_page, parse_update_receipt,
};
use crate::types::{BulkUpdate, SearchOptions, SearchPage, UpdateReceipt};

/// OpenSearch client implementation.
///
/// One instance is built at startup and shared by every caller.
///
/// # Example
///
/// ```ignore
/// let settings = ConnectionSettings::from_parts("https", "localhost", 9200)
///     .with_credentials("admin", "admin")
///     .with_verify_certs(false);
/// let client = OpenSearchClient::new(&settings).await?;
///
/// let exists = client.index_exists("dummy").await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the given connection settings.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or the transport cannot be built
    pub async fn new(settings: &ConnectionSettings) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(&settings.url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if let Some((username, password)) = settings.credentials() {
            builder = builder.auth(Credentials::Basic(
                username.to_string(),
                password.to_string(),
            ));
        }

        if !settings.verify_certs {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        info!(
            url = %settings.url,
            authenticated = settings.credentials().is_some(),
            verify_certs = settings.verify_certs,
            "Created OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Turn a non-success response into an error built by `to_error`.
    async fn ensure_success(
        response: Response,
        operation: &str,
        to_error: fn(String) -> SearchError,
    ) -> Result<Response, SearchError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(operation = operation, status = %status, body = %error_body, "Request failed");
        Err(to_error(format!(
            "{} failed with status {}: {}",
            operation, status, error_body
        )))
    }

    async fn read_json(response: Response) -> Result<Value, SearchError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }
}

#[async_trait]
impl SearchEngine for OpenSearchClient {
    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let indices = [index];
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&indices))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => {
                Self::ensure_success(response, "Index exists", SearchError::QueryError).await?;
                Ok(true)
            }
        }
    }

    #[instrument(skip(self))]
    async fn create_index(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        Self::ensure_success(response, "Index creation", SearchError::IndexCreationError).await?;

        info!(index = %index, "Created index");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        let indices = [index];
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&indices))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        Self::ensure_success(response, "Index deletion", SearchError::DeleteError).await?;

        info!(index = %index, "Deleted index");
        Ok(())
    }

    #[instrument(skip(self, body))]
    async fn index_document(&self, index: &str, body: &Document) -> Result<String, SearchError> {
        let response = self
            .client
            .index(IndexParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let response = Self::ensure_success(response, "Index", SearchError::IndexError).await?;
        let id = parse_index_response(&Self::read_json(response).await?)?;

        debug!(index = %index, id = %id, "Document indexed");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_document(&self, index: &str, id: &str) -> Result<Document, SearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        if response.status_code().as_u16() == 404 {
            return Err(SearchError::not_found(index, id));
        }

        let response = Self::ensure_success(response, "Get", SearchError::QueryError).await?;
        parse_get_response(&Self::read_json(response).await?)
    }

    #[instrument(skip(self, partial))]
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        partial: &Document,
    ) -> Result<UpdateReceipt, SearchError> {
        let response = self
            .client
            .update(UpdateParts::IndexId(index, id))
            .body(update_body(partial))
            .send()
            .await
            .map_err(|e| SearchError::update(e.to_string()))?;

        if response.status_code().as_u16() == 404 {
            return Err(SearchError::not_found(index, id));
        }

        let response = Self::ensure_success(response, "Update", SearchError::UpdateError).await?;
        let receipt = parse_update_receipt(Self::read_json(response).await?)?;

        debug!(index = %index, id = %id, result = %receipt.result, "Document updated");
        Ok(receipt)
    }

    #[instrument(skip(self))]
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        if response.status_code().as_u16() == 404 {
            return Err(SearchError::not_found(index, id));
        }

        Self::ensure_success(response, "Delete", SearchError::DeleteError).await?;

        debug!(index = %index, id = %id, "Document deleted");
        Ok(())
    }

    #[instrument(skip(self, body))]
    async fn search(
        &self,
        index: &str,
        body: &Value,
        options: &SearchOptions,
    ) -> Result<SearchPage, SearchError> {
        let indices = [index];
        let mut request = self.client.search(SearchParts::Index(&indices)).body(body);

        if let Some(size) = options.size {
            request = request.size(size as i64);
        }
        if let Some(keep_alive) = options.scroll.as_deref() {
            request = request.scroll(keep_alive);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let response = Self::ensure_success(response, "Search", SearchError::QueryError).await?;
        let page = parse_search_page(&Self::read_json(response).await?)?;

        debug!(index = %index, hits = page.hits.len(), "Search completed");
        Ok(page)
    }

    #[instrument(skip(self, scroll_id))]
    async fn scroll(&self, scroll_id: &str, keep_alive: &str) -> Result<SearchPage, SearchError> {
        let response = self
            .client
            .scroll(ScrollParts::None)
            .body(scroll_body(scroll_id, keep_alive))
            .send()
            .await
            .map_err(|e| SearchError::scroll(e.to_string()))?;

        let response = Self::ensure_success(response, "Scroll", SearchError::ScrollError).await?;
        let page = parse_search_page(&Self::read_json(response).await?)?;

        debug!(hits = page.hits.len(), "Scroll batch fetched");
        Ok(page)
    }

    #[instrument(skip(self, scroll_id))]
    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .clear_scroll(ClearScrollParts::None)
            .body(clear_scroll_body(scroll_id))
            .send()
            .await
            .map_err(|e| SearchError::scroll(e.to_string()))?;

        // 404 means the cursor already expired
        if response.status_code().as_u16() != 404 {
            Self::ensure_success(response, "Clear scroll", SearchError::ScrollError).await?;
        }

        debug!("Scroll cleared");
        Ok(())
    }

    #[instrument(skip(self, updates), fields(update_count = updates.len()))]
    async fn bulk_update(
        &self,
        index: &str,
        updates: &[BulkUpdate],
        refresh: bool,
    ) -> Result<Vec<Value>, SearchError> {
        if updates.is_empty() {
            return Ok(Vec::new());
        }

        let lines: Vec<JsonBody<Value>> = bulk_update_lines(updates)
            .into_iter()
            .map(JsonBody::new)
            .collect();

        let refresh = if refresh { Refresh::True } else { Refresh::False };

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(lines)
            .refresh(refresh)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let response = Self::ensure_success(response, "Bulk", SearchError::BulkIndexError).await?;
        let items = parse_bulk_items(Self::read_json(response).await?)?;

        debug!(index = %index, items = items.len(), "Bulk update submitted");
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        Ok(parse_cluster_health(&Self::read_json(response).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_rejects_invalid_url() {
        let settings = ConnectionSettings::new("not a url");

        let result = OpenSearchClient::new(&settings).await;

        assert!(matches!(result, Err(SearchError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_new_with_credentials_and_insecure_tls() {
        let settings = ConnectionSettings::from_parts("https", "localhost", 9200)
            .with_credentials("admin", "admin")
            .with_verify_certs(false);

        assert!(OpenSearchClient::new(&settings).await.is_ok());
    }
}
