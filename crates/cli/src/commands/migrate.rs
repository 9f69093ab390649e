//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! jcpao-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DIRECTORY_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! Runs the directory migrations in `crates/directory/migrations/`, then the
//! `tower-sessions` store migration. The roster view `employee_info_view` is
//! maintained outside this application and is never touched.

use tower_sessions_sqlx_store::PostgresStore;

use super::{CommandError, connect};

/// Run all directory migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running directory migrations...");
    sqlx::migrate!("../directory/migrations").run(&pool).await?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool.clone())
        .migrate()
        .await
        .map_err(CommandError::SessionStore)?;

    tracing::info!("Directory migrations complete!");
    Ok(())
}
