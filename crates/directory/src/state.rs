//! Application state shared across handlers.

use std::sync::Arc;

use jcpao_directory_core::Roster;
use sqlx::PgPool;

use crate::config::DirectoryConfig;
use crate::db::{AccessLogRepository, EmployeeRepository};
use crate::error::AppError;
use crate::services::{ImageStore, RosterCache};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Nothing in it is mutable per
/// session; session data lives in `tower-sessions`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DirectoryConfig,
    pool: PgPool,
    roster: RosterCache,
    images: ImageStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: DirectoryConfig, pool: PgPool) -> Self {
        let roster = RosterCache::new(config.roster_cache_ttl);
        let images = ImageStore::new(&config.images);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                roster,
                images,
            }),
        }
    }

    /// Get a reference to the directory configuration.
    #[must_use]
    pub fn config(&self) -> &DirectoryConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the headshot image store.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.inner.images
    }

    /// Access log repository over the shared pool.
    #[must_use]
    pub fn access_log(&self) -> AccessLogRepository<'_> {
        AccessLogRepository::new(&self.inner.pool)
    }

    /// The roster, loaded from the database on first use.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Roster` if the roster query fails.
    pub async fn roster(&self) -> Result<Arc<Roster>, AppError> {
        let repo = EmployeeRepository::new(&self.inner.pool);
        Ok(self.inner.roster.get_or_load(repo.list_directory()).await?)
    }
}
