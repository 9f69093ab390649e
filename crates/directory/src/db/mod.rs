//! Database operations for the directory `PostgreSQL`.
//!
//! ## Tables
//!
//! - `employee_info_view` - Staff roster (maintained outside this application, read-only)
//! - `courts_log` / `police_log` - Append-only portal access logs
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/directory/migrations/` and run via:
//! ```bash
//! cargo run -p jcpao-directory-cli -- migrate
//! ```

pub mod access_log;
pub mod employees;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use access_log::AccessLogRepository;
pub use employees::EmployeeRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool connects eagerly, so an unreachable database fails here rather
/// than on the first request.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
