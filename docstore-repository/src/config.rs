//! Configuration types for the DocumentStore.

/// Keep-alive requested for every scroll cursor.
pub const DEFAULT_SCROLL_KEEP_ALIVE: &str = "2m";

/// Default scroll batch used by bulk updates.
pub const DEFAULT_BULK_BATCH_SIZE: usize = 100;

/// Default upper bound on a scroll batch.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Configuration for the DocumentStore.
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    /// Lifetime of a server-side scroll cursor between two fetches.
    pub scroll_keep_alive: String,
    /// Documents fetched and updated per bulk request.
    pub bulk_batch_size: usize,
    /// Maximum number of documents requested per scroll batch.
    /// Set to None to disable the limit.
    pub max_batch_size: Option<usize>,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            scroll_keep_alive: DEFAULT_SCROLL_KEEP_ALIVE.to_string(),
            bulk_batch_size: DEFAULT_BULK_BATCH_SIZE,
            max_batch_size: Some(DEFAULT_MAX_BATCH_SIZE),
        }
    }
}

impl DocumentStoreConfig {
    /// Create a config with no batch size limit.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
            ..Self::default()
        }
    }

    /// Create a config with a custom batch size limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
            ..Self::default()
        }
    }

    /// Set the batch size used by bulk updates.
    pub fn with_bulk_batch_size(mut self, bulk_batch_size: usize) -> Self {
        self.bulk_batch_size = bulk_batch_size;
        self
    }
}
