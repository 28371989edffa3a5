//! A search-index session and the presentation seam it renders through.
//!
//! A session owns one [`IndexCache`] and one [`RebuildCoordinator`]. User
//! actions arrive as [`IndexSession::on_build_requested`] and
//! [`IndexSession::on_search_requested`]; outcomes are pushed to a
//! [`PresentationAdapter`], which owns all rendering.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::IndexCache;
use crate::coordinator::RebuildCoordinator;
use crate::document::IndexCollection;
use crate::error::{Error, Result};
use crate::query::{QueryEngine, SearchResults};
use crate::source::RegistrySource;

/// Renders session outcomes.
pub trait PresentationAdapter {
    /// Shows the reported document count of a freshly loaded index.
    fn show_count(&mut self, count: u64);

    /// Shows the results of a search.
    fn show_results(&mut self, results: &SearchResults);

    /// Shows a failure. The session stays usable with its previous index.
    fn show_error(&mut self, error: &Error);
}

/// Client-side index state for one user session.
#[derive(Debug)]
pub struct IndexSession<S> {
    cache: IndexCache,
    coordinator: RebuildCoordinator<S>,
    engine: QueryEngine,
}

impl<S: RegistrySource> IndexSession<S> {
    /// Creates a session with an empty cache.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            cache: IndexCache::new(),
            coordinator: RebuildCoordinator::new(source),
            engine: QueryEngine::new(),
        }
    }

    /// Overrides the bound applied to each remote step.
    #[must_use]
    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.coordinator = self.coordinator.with_step_timeout(step_timeout);
        self
    }

    /// The session's cache.
    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// The registry this session talks to.
    pub fn source(&self) -> &S {
        self.coordinator.source()
    }

    /// Replaces the cached collection.
    pub fn load(&self, collection: IndexCollection) {
        self.cache.replace(collection);
    }

    /// Snapshot of the cached collection.
    #[must_use]
    pub fn current(&self) -> Arc<IndexCollection> {
        self.cache.current()
    }

    /// Searches the cached collection.
    #[must_use]
    pub fn search(&self, query: Option<&str>) -> SearchResults {
        self.engine.search(&self.cache.current(), query)
    }

    /// Rebuilds the remote index and reloads the cache.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rebuild`]; the cache keeps its previous collection.
    pub async fn rebuild_and_refresh(&self) -> Result<Arc<IndexCollection>> {
        self.coordinator.rebuild_and_refresh(&self.cache).await
    }

    /// Fetches the index without rebuilding it and reloads the cache.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the cache keeps its previous collection.
    pub async fn refresh(&self) -> Result<Arc<IndexCollection>> {
        self.coordinator.refresh(&self.cache).await
    }

    /// Fetches the index without rebuilding and shows its count.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure after showing it.
    pub async fn initial_load(
        &self,
        adapter: &mut dyn PresentationAdapter,
    ) -> Result<Arc<IndexCollection>> {
        let loaded = self
            .refresh()
            .await
            .inspect_err(|e| adapter.show_error(e))?;
        adapter.show_count(loaded.count);
        Ok(loaded)
    }

    /// Handles a rebuild request from the user.
    ///
    /// # Errors
    ///
    /// Returns the rebuild failure after showing it.
    pub async fn on_build_requested(
        &self,
        adapter: &mut dyn PresentationAdapter,
    ) -> Result<Arc<IndexCollection>> {
        let loaded = self
            .rebuild_and_refresh()
            .await
            .inspect_err(|e| adapter.show_error(e))?;
        adapter.show_count(loaded.count);
        Ok(loaded)
    }

    /// Handles a search request from the user.
    pub fn on_search_requested(
        &self,
        query: Option<&str>,
        adapter: &mut dyn PresentationAdapter,
    ) -> SearchResults {
        let results = self.search(query);
        adapter.show_results(&results);
        results
    }
}
