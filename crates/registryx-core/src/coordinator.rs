//! Sequencing of index rebuilds and cache refreshes.
//!
//! A rebuild-and-refresh cycle is strictly sequential: build, then fetch,
//! then a single cache load. If either remote step fails or times out the
//! cache keeps its previous collection and the failure is returned.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::IndexCache;
use crate::document::IndexCollection;
use crate::error::{Error, RebuildStage, Result};
use crate::source::RegistrySource;

/// Default bound on each remote step.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// Drives build and fetch requests against a registry and loads the results.
#[derive(Debug)]
pub struct RebuildCoordinator<S> {
    source: S,
    step_timeout: Duration,
}

impl<S: RegistrySource> RebuildCoordinator<S> {
    /// Creates a coordinator using [`DEFAULT_STEP_TIMEOUT`].
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    /// Overrides the bound applied to each remote step.
    #[must_use]
    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }

    /// The registry this coordinator talks to.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the index without rebuilding it and loads it into `cache`.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure; the cache is left unchanged.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, cache: &IndexCache) -> Result<Arc<IndexCollection>> {
        let collection = self
            .bounded("fetch index", self.source.fetch_index())
            .await?;
        cache.replace(collection);
        Ok(cache.current())
    }

    /// Requests an index rebuild, then fetches and loads the new index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rebuild`] naming the failed step. The cache is only
    /// written after both steps succeed.
    #[tracing::instrument(skip_all)]
    pub async fn rebuild_and_refresh(&self, cache: &IndexCache) -> Result<Arc<IndexCollection>> {
        self.bounded("build index", self.source.build_index())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "index build request failed");
                Error::rebuild(RebuildStage::Build, e)
            })?;

        let collection = self
            .bounded("fetch index", self.source.fetch_index())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "index fetch after rebuild failed");
                Error::rebuild(RebuildStage::Fetch, e)
            })?;

        cache.replace(collection);
        let current = cache.current();
        tracing::info!(
            items = current.len(),
            count = current.count,
            "index rebuilt and refreshed"
        );
        Ok(current)
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        step: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.step_timeout, step)
            .await
            .map_err(|_| Error::Timeout {
                operation,
                timeout: self.step_timeout,
            })?
    }
}
