//! CLI command implementations.

pub mod migrate;
pub mod roster;

use jcpao_directory::db::RepositoryError;
use jcpao_directory_core::SelectionError;
use thiserror::Error;

/// Errors from any CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Session store migration error: {0}")]
    SessionStore(#[source] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Connect using `DIRECTORY_DATABASE_URL`, falling back to `DATABASE_URL`.
pub(crate) async fn connect() -> Result<sqlx::PgPool, CommandError> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DIRECTORY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("DIRECTORY_DATABASE_URL"))?;

    tracing::info!("Connecting to directory database...");
    Ok(jcpao_directory::db::create_pool(&secrecy::SecretString::from(database_url)).await?)
}
