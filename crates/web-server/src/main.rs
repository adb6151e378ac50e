use database::{DbRepository, connect, run_migrations};

// This main function is the entry point when running `cargo run -p web-server`.
// It loads `querylab.toml` (if present) and serves the scenario endpoints.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configuration::load_config(None)?;
    let _log_guard = configuration::init_tracing(&config.logging, false)?;

    let db_pool = connect(&config.database).await?;
    run_migrations(&db_pool).await?;

    web_server::run_server(&config.server, DbRepository::new(db_pool)).await
}
