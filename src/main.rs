use clap::{Parser, Subcommand};
use configuration::{Config, ConfigArgs};
use core_types::Scenario;
// Import database types directly from the database crate
use database::connection::{connect, run_migrations};
use database::repository::DbRepository;
use seeder::SeedOptions;

mod compare;

/// The main entry point for the querylab application.
#[tokio::main]
async fn main() {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Side-by-side demonstrations of naive and optimized relational query patterns.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate the database with synthetic authors and books.
    Seed(SeedArgs),
    /// Serve the bad/good query endpoints over HTTP.
    Serve(ServeArgs),
    /// Run both strategies of each scenario and print a comparison table.
    Compare(CompareArgs),
    /// Print the number of authors and books currently stored.
    Stats,
}

#[derive(Parser)]
struct SeedArgs {
    /// Number of authors to create (default from configuration: 5000).
    #[arg(long)]
    authors: Option<u32>,

    /// Number of books per author (default from configuration: 100).
    #[arg(long)]
    books_per_author: Option<u32>,

    /// Seed for the random generator, for reproducible data.
    #[arg(long)]
    seed: Option<u64>,

    /// Delete all existing authors and books first.
    #[arg(long)]
    reset: bool,
}

#[derive(Parser)]
struct CompareArgs {
    /// Only compare this scenario (n-plus-1, aggregation, filtering, many-to-many).
    #[arg(long)]
    scenario: Option<Scenario>,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind (overrides configuration).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides configuration).
    #[arg(long)]
    port: Option<u16>,
}

impl CompareArgs {
    fn selected(&self) -> Vec<Scenario> {
        match self.scenario {
            Some(scenario) => vec![scenario],
            None => Scenario::ALL.to_vec(),
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = configuration::load_config(cli.config.config.as_deref())?;
    let _log_guard = configuration::init_tracing(&config.logging, cli.config.debug)?;

    // Initialize the database connection and run migrations
    let db_pool = connect(&config.database).await?;
    run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    match cli.command {
        Commands::Seed(args) => handle_seed(args, &config, &db_repo).await,
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            web_server::run_server(&config.server, db_repo).await
        }
        Commands::Compare(args) => {
            let scenarios = args.selected();
            let comparisons = compare::compare_all(&db_repo, &scenarios).await?;
            println!("{}", compare::render(&comparisons));
            if comparisons.iter().any(|c| !c.identical()) {
                anyhow::bail!("naive and optimized strategies returned different results");
            }
            Ok(())
        }
        Commands::Stats => {
            let authors = db_repo.count_authors().await?;
            let books = db_repo.count_books().await?;
            println!("authors: {authors}");
            println!("books:   {books}");
            Ok(())
        }
    }
}

/// Handles the seeding command, filling in unset flags from the configuration.
async fn handle_seed(args: SeedArgs, config: &Config, db_repo: &DbRepository) -> anyhow::Result<()> {
    let options = SeedOptions {
        authors: args.authors.unwrap_or(config.seed.authors),
        books_per_author: args.books_per_author.unwrap_or(config.seed.books_per_author),
        rng_seed: args.seed,
        reset: args.reset,
        show_progress: true,
    };

    seeder::seed(db_repo, &options).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn seed_flags_parse() {
        let cli = Cli::parse_from([
            "querylab",
            "--config",
            "custom.toml",
            "seed",
            "--authors",
            "10",
            "--books-per-author",
            "3",
            "--seed",
            "99",
            "--reset",
        ]);
        assert_eq!(cli.config.config.as_deref(), Some(std::path::Path::new("custom.toml")));
        match cli.command {
            Commands::Seed(args) => {
                assert_eq!(args.authors, Some(10));
                assert_eq!(args.books_per_author, Some(3));
                assert_eq!(args.seed, Some(99));
                assert!(args.reset);
            }
            _ => panic!("expected seed"),
        }
    }

    #[test]
    fn compare_accepts_a_scenario_filter() {
        let cli = Cli::parse_from(["querylab", "compare", "--scenario", "foreign-key"]);
        match cli.command {
            Commands::Compare(args) => assert_eq!(args.selected(), vec![Scenario::NPlusOne]),
            _ => panic!("expected compare"),
        }

        let cli = Cli::parse_from(["querylab", "compare"]);
        match cli.command {
            Commands::Compare(args) => assert_eq!(args.selected(), Scenario::ALL.to_vec()),
            _ => panic!("expected compare"),
        }

        assert!(Cli::try_parse_from(["querylab", "compare", "--scenario", "joins"]).is_err());
    }

    #[test]
    fn global_debug_flag_after_subcommand() {
        let cli = Cli::parse_from(["querylab", "serve", "--port", "9000", "--debug"]);
        assert!(cli.config.debug);
        assert!(matches!(cli.command, Commands::Serve(ServeArgs { port: Some(9000), .. })));
    }
}
