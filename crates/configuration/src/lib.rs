use crate::error::ConfigError;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DatabaseSettings, LoggingSettings, SeedSettings, ServerSettings};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "querylab";

/// Prefix of environment overrides, e.g. `QUERYLAB__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "QUERYLAB";

/// Command-line flags shared by every subcommand.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file (default: ./querylab.toml if present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file (the
/// given path, which must exist, or an optional `querylab.toml`), then
/// `QUERYLAB__*` environment variables. The result is validated before it is
/// returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => tracing::debug!(file = %path.display(), "Loading configuration."),
        None => tracing::debug!(file = DEFAULT_CONFIG_FILE, "Loading optional configuration."),
    }

    let file = match path {
        Some(path) => config::File::from(PathBuf::from(path)).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
