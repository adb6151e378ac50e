use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load settings for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("The requested data was not found in the database: {0}")]
    NotFound(String),
}

impl From<configuration::error::ConfigError> for DbError {
    fn from(err: configuration::error::ConfigError) -> Self {
        DbError::ConnectionConfigError(err.to_string())
    }
}
