//! Remote collection state for one list view.
//!
//! A `RemoteCollection` owns the fetched records of a single scope (a church
//! or a service) and exposes them as loading / error / data. Only the most
//! recently started fetch may write its result; anything that finishes after
//! a newer request began is dropped.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::constants::ERR_FETCH_COLLECTION;
use crate::error::ApiError;

/// Fetches the records of one scope.
pub trait CollectionSource<T>: Send + Sync {
    fn fetch(&self, scope_id: &str) -> impl Future<Output = Result<Vec<T>, ApiError>> + Send;
}

#[derive(Debug)]
struct Inner<T> {
    scope: Option<String>,
    generation: u64,
    loading: bool,
    data: Option<Arc<Vec<T>>>,
    error: Option<String>,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Self {
            scope: None,
            generation: 0,
            loading: false,
            data: None,
            error: None,
        }
    }
}

/// Point-in-time view of a collection.
#[derive(Debug, Clone)]
pub struct CollectionSnapshot<T> {
    pub scope: Option<String>,
    pub loading: bool,
    pub data: Option<Arc<Vec<T>>>,
    pub error: Option<String>,
}

impl<T> CollectionSnapshot<T> {
    /// The fetched records, or `None` while nothing has resolved yet.
    pub fn records(&self) -> Option<&[T]> {
        self.data.as_deref().map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result (data or error) was stored.
    Applied,
    /// A newer request started meanwhile; the result was discarded.
    Stale,
    /// No scope, nothing fetched.
    Skipped,
}

pub struct RemoteCollection<T, S> {
    source: S,
    inner: Arc<RwLock<Inner<T>>>,
}

impl<T, S> RemoteCollection<T, S>
where
    T: Send + Sync,
    S: CollectionSource<T>,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches `scope_id`, or clears the collection when there is no scope.
    pub async fn load(&self, scope_id: Option<&str>) -> LoadOutcome {
        let Some(scope_id) = scope_id.map(str::trim).filter(|s| !s.is_empty()) else {
            let mut inner = self.inner.write().await;
            let generation = inner.generation + 1;
            *inner = Inner {
                generation,
                ..Inner::default()
            };
            return LoadOutcome::Skipped;
        };

        let generation = {
            let mut inner = self.inner.write().await;
            inner.generation += 1;
            if inner.scope.as_deref() != Some(scope_id) {
                inner.scope = Some(scope_id.to_string());
                inner.data = None;
            }
            inner.loading = true;
            inner.error = None;
            inner.generation
        };
        tracing::debug!(scope = scope_id, generation, "collection fetch started");

        let result = self.source.fetch(scope_id).await;

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            tracing::warn!(
                scope = scope_id,
                generation,
                latest = inner.generation,
                "discarding stale collection result"
            );
            return LoadOutcome::Stale;
        }

        inner.loading = false;
        match result {
            Ok(records) => {
                tracing::info!(scope = scope_id, count = records.len(), "collection loaded");
                inner.data = Some(Arc::new(records));
            }
            Err(e) => {
                tracing::warn!(scope = scope_id, error = %e, "collection fetch failed");
                inner.error = Some(ERR_FETCH_COLLECTION.to_string());
            }
        }
        LoadOutcome::Applied
    }

    /// Re-fetches the last scope. Current data stays visible until the new
    /// result lands.
    pub async fn refetch(&self) -> LoadOutcome {
        let scope = self.inner.read().await.scope.clone();
        match scope {
            Some(scope) => self.load(Some(&scope)).await,
            None => LoadOutcome::Skipped,
        }
    }

    pub async fn snapshot(&self) -> CollectionSnapshot<T> {
        let inner = self.inner.read().await;
        CollectionSnapshot {
            scope: inner.scope.clone(),
            loading: inner.loading,
            data: inner.data.clone(),
            error: inner.error.clone(),
        }
    }
}
