//! Integration tests for the JCPAO directory.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and start both deployments against a database with employee_info_view
//! cargo run -p jcpao-directory-cli -- migrate
//! cargo run -p jcpao-directory
//! DIRECTORY_MODE=internal DIRECTORY_PORT=3001 cargo run -p jcpao-directory
//!
//! # In another shell, with the same .env
//! cargo test -p jcpao-directory-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `DIRECTORY_BASE_URL` - Portal deployment under test (default: <http://localhost:3000>)
//! - `DIRECTORY_INTERNAL_URL` - Internal deployment under test (default: <http://localhost:3001>)
//! - `COURT_SECURITY_CODE` - The code the server was started with
//! - `DIRECTORY_DATABASE_URL` / `DATABASE_URL` - For checking access log rows

use reqwest::{Client, redirect::Policy};
use sqlx::PgPool;

/// Base URL of the running portal deployment.
#[must_use]
pub fn base_url() -> String {
    let _ = dotenvy::dotenv();
    std::env::var("DIRECTORY_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL of the running internal deployment.
#[must_use]
pub fn internal_base_url() -> String {
    let _ = dotenvy::dotenv();
    std::env::var("DIRECTORY_INTERNAL_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A client with its own cookie jar, i.e. a fresh session.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Like [`session_client`], but redirects are returned instead of followed.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn no_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// The court portal code the server under test was started with.
///
/// # Panics
///
/// Panics if `COURT_SECURITY_CODE` is not set.
#[must_use]
#[allow(clippy::expect_used)]
pub fn court_code() -> String {
    let _ = dotenvy::dotenv();
    std::env::var("COURT_SECURITY_CODE").expect("COURT_SECURITY_CODE must be set")
}

/// Pool on the server's database.
///
/// # Panics
///
/// Panics if no database URL is set or the database is unreachable.
#[allow(clippy::expect_used)]
pub async fn database() -> PgPool {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DIRECTORY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("DIRECTORY_DATABASE_URL must be set");
    PgPool::connect(&url).await.expect("Failed to connect to database")
}

/// Number of `courts_log` rows for `email`.
///
/// # Panics
///
/// Panics if the query fails.
#[allow(clippy::expect_used)]
pub async fn court_log_count(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM courts_log WHERE user_email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("Failed to count courts_log rows")
}
