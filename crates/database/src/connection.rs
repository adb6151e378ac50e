use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::migrate::Migrator;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

/// The embedded schema migrations for `authors` and `books`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Establishes a connection pool to the PostgreSQL database.
///
/// The connection string comes from the configuration, or `DATABASE_URL` when
/// the configuration leaves it unset. The pool is cheap to clone and is shared
/// by every handler and command.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let database_url = settings.resolve_url()?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(&database_url)
        .await?;

    tracing::debug!(max_connections = settings.max_connections, "Database pool ready.");
    Ok(pool)
}

/// Applies any pending migrations so the schema is up-to-date before use.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
