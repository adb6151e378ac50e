use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub seed: SeedSettings,
    pub logging: LoggingSettings,
}

/// Connection pool settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string. Falls back to the `DATABASE_URL` environment variable.
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Volume of synthetic data produced by one `seed` run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    pub authors: u32,
    pub books_per_author: u32,
}

/// Optional file logging in addition to stderr.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Directory for daily rolling log files. Console only when unset.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            authors: 5000,
            books_per_author: 100,
        }
    }
}

impl Config {
    /// Checks the values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.database.acquire_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "database.acquire_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("server.host must not be empty".to_string()));
        }
        Ok(())
    }
}

impl DatabaseSettings {
    /// Resolves the connection string, reading `DATABASE_URL` (and `.env`) when
    /// the configuration file does not set one.
    pub fn resolve_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }
        dotenvy::dotenv().ok();
        std::env::var("DATABASE_URL").map_err(|_| {
            ConfigError::ValidationError(
                "database.url is not configured and DATABASE_URL is not set".to_string(),
            )
        })
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
