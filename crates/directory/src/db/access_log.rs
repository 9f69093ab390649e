//! Portal access log repository.

use sqlx::PgPool;
use tracing::instrument;

use jcpao_directory_core::{AccessLogEntry, AccessLogSink, Portal};

use super::RepositoryError;

/// Log table for a portal. Table names cannot be bound as parameters, so
/// they come from this fixed mapping only.
const fn log_table(portal: Portal) -> &'static str {
    match portal {
        Portal::Court => "courts_log",
        Portal::Police => "police_log",
    }
}

/// Repository for the append-only access logs.
pub struct AccessLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccessLogRepository<'a> {
    /// Create a new access log repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert one access record; the timestamp is set by the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, entry), fields(portal = %entry.portal))]
    pub async fn insert(&self, entry: &AccessLogEntry) -> Result<(), RepositoryError> {
        let query = format!(
            "INSERT INTO {} (user_email, user_ip) VALUES ($1, $2)",
            log_table(entry.portal)
        );

        sqlx::query(&query)
            .bind(&entry.email)
            .bind(&entry.ip)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

impl AccessLogSink for AccessLogRepository<'_> {
    type Error = RepositoryError;

    async fn append(&self, entry: &AccessLogEntry) -> Result<(), Self::Error> {
        self.insert(entry).await
    }
}
