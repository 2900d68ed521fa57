//! Settings read from the environment.

use std::env;
use tracing::info;

use crate::AppError;
use docstore_repository::config::{DEFAULT_BULK_BATCH_SIZE, DEFAULT_MAX_BATCH_SIZE};
use docstore_repository::{ConnectionSettings, DocumentStoreConfig};

/// Default search engine host.
const DEFAULT_HOST: &str = "localhost";

/// Default search engine port.
const DEFAULT_PORT: u16 = 9200;

/// Default URL scheme.
const DEFAULT_SCHEME: &str = "https";

/// Everything needed to build the dependencies.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub connection: ConnectionSettings,
    pub store: DocumentStoreConfig,
}

impl AppSettings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ELASTIC_HOSTNAME`: Search engine host (default: localhost)
    /// - `ELASTIC_PORT`: Search engine port (default: 9200)
    /// - `ELASTIC_SCHEME`: `http` or `https` (default: https)
    /// - `ELASTIC_USERNAME` / `ELASTIC_PASSWORD`: Basic auth, used only when both are set
    /// - `ELASTIC_VERIFY_CERTS`: Validate the server certificate (default: false)
    /// - `DOCSTORE_MAX_BATCH_SIZE`: Scroll batch limit, `0` disables it (default: 1000)
    /// - `DOCSTORE_BULK_BATCH_SIZE`: Documents per bulk update request (default: 100)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("ELASTIC_HOSTNAME").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let scheme = var("ELASTIC_SCHEME").unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        let port = match var("ELASTIC_PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid ELASTIC_PORT '{}': {}", port, e)))?,
            None => DEFAULT_PORT,
        };
        let verify_certs = match var("ELASTIC_VERIFY_CERTS") {
            Some(value) => parse_flag("ELASTIC_VERIFY_CERTS", &value)?,
            None => false,
        };

        let mut connection =
            ConnectionSettings::from_parts(&scheme, &host, port).with_verify_certs(verify_certs);
        if let (Some(username), Some(password)) = (var("ELASTIC_USERNAME"), var("ELASTIC_PASSWORD")) {
            connection = connection.with_credentials(username, password);
        }

        let max_batch_size = match var("DOCSTORE_MAX_BATCH_SIZE") {
            Some(value) => parse_count("DOCSTORE_MAX_BATCH_SIZE", &value)?,
            None => DEFAULT_MAX_BATCH_SIZE,
        };
        let bulk_batch_size = match var("DOCSTORE_BULK_BATCH_SIZE") {
            Some(value) => parse_count("DOCSTORE_BULK_BATCH_SIZE", &value)?,
            None => DEFAULT_BULK_BATCH_SIZE,
        };

        let store = if max_batch_size == 0 {
            DocumentStoreConfig::unlimited()
        } else {
            DocumentStoreConfig::with_max_batch_size(max_batch_size)
        }
        .with_bulk_batch_size(bulk_batch_size);

        info!(
            url = %connection.url,
            verify_certs = connection.verify_certs,
            max_batch_size = ?store.max_batch_size,
            bulk_batch_size = store.bulk_batch_size,
            "Loaded settings"
        );

        Ok(Self { connection, store })
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::config(format!("Invalid {} '{}'", key, other))),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, AppError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| AppError::config(format!("Invalid {} '{}': {}", key, value, e)))
}
