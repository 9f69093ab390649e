//! Process-wide roster cache.
//!
//! The roster is loaded once and shared read-only by every session, using
//! `moka` with a single entry. Concurrent misses share one load, and a failed
//! load is not cached, so the next request tries again.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use jcpao_directory_core::Roster;
use moka::future::Cache;

use crate::db::RepositoryError;

/// Cache holding the loaded roster.
#[derive(Clone)]
pub struct RosterCache {
    cache: Cache<(), Arc<Roster>>,
}

impl RosterCache {
    /// Create a cache; `ttl` of `None` keeps the roster for the process lifetime.
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(1);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            cache: builder.build(),
        }
    }

    /// Return the cached roster, running `load` on a miss.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, shared between all callers that waited on
    /// the same load.
    pub async fn get_or_load<F>(&self, load: F) -> Result<Arc<Roster>, Arc<RepositoryError>>
    where
        F: Future<Output = Result<Roster, RepositoryError>>,
    {
        self.cache
            .try_get_with((), async { load.await.map(Arc::new) })
            .await
    }
}

#[cfg(test)]
impl RosterCache {
    /// Seed the cache without a database.
    pub(crate) async fn preload(&self, roster: Roster) {
        self.cache.insert((), Arc::new(roster)).await;
    }
}
