//! Scroll cursor over a whole index.
//!
//! The first call opens a server-side scroll with a match-all query; every
//! following call fetches the next batch through the returned cursor id. The
//! cursor is exhausted by the first empty batch, at which point the server
//! context is released.

use tracing::{debug, warn};

use crate::errors::SearchError;
use crate::interfaces::SearchEngine;
use crate::opensearch::match_all_query;
use crate::types::{Hit, SearchOptions, SearchPage};

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    Start,
    Open(String),
    Done,
}

/// Sequential reader of every document in an index, one batch at a time.
///
/// A cursor belongs to a single caller; it is neither `Clone` nor shared.
pub struct ScrollCursor<'a> {
    engine: &'a dyn SearchEngine,
    index: &'a str,
    batch_size: usize,
    keep_alive: &'a str,
    state: CursorState,
    batches: usize,
}

impl<'a> ScrollCursor<'a> {
    pub fn new(
        engine: &'a dyn SearchEngine,
        index: &'a str,
        batch_size: usize,
        keep_alive: &'a str,
    ) -> Self {
        Self {
            engine,
            index,
            batch_size,
            keep_alive,
            state: CursorState::Start,
            batches: 0,
        }
    }

    /// Number of non-empty batches handed out so far.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn is_done(&self) -> bool {
        self.state == CursorState::Done
    }

    /// Fetch the next non-empty batch, or `None` once the index is exhausted.
    ///
    /// A failed fetch is returned as-is and leaves the server context to
    /// expire on its own.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<Hit>>, SearchError> {
        let page = match &self.state {
            CursorState::Start => {
                let options = SearchOptions::new()
                    .with_size(self.batch_size)
                    .with_scroll(self.keep_alive);
                self.engine
                    .search(self.index, &match_all_query(), &options)
                    .await?
            }
            CursorState::Open(scroll_id) => self.engine.scroll(scroll_id, self.keep_alive).await?,
            CursorState::Done => return Ok(None),
        };

        self.advance(page).await
    }

    async fn advance(&mut self, page: SearchPage) -> Result<Option<Vec<Hit>>, SearchError> {
        // The engine may hand out a new cursor id with every batch
        let scroll_id = match (page.scroll_id, &self.state) {
            (Some(id), _) => Some(id),
            (None, CursorState::Open(previous)) => Some(previous.clone()),
            (None, _) => None,
        };

        if page.hits.is_empty() {
            self.state = CursorState::Done;
            if let Some(scroll_id) = scroll_id {
                self.release(&scroll_id).await;
            }
            debug!(index = %self.index, batches = self.batches, "Scroll exhausted");
            return Ok(None);
        }

        self.batches += 1;
        self.state = match scroll_id {
            Some(id) => CursorState::Open(id),
            None => {
                debug!(index = %self.index, "No scroll id returned, treating batch as final");
                CursorState::Done
            }
        };

        Ok(Some(page.hits))
    }

    async fn release(&self, scroll_id: &str) {
        if let Err(e) = self.engine.clear_scroll(scroll_id).await {
            warn!(index = %self.index, error = %e, "Failed to release scroll context");
        }
    }
}
