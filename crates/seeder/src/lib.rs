//! # querylab Seeder
//!
//! Populates the database with synthetic authors and books for the scenario
//! endpoints. Every run appends: nothing is deduplicated and nothing is rolled
//! back if a later insert fails. Pass `reset` to start from empty tables.

use chrono::Utc;
use database::DbRepository;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod error;
pub mod generator;

pub use error::SeedError;
pub use generator::FakeData;

/// What a seeding run should produce.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub authors: u32,
    pub books_per_author: u32,
    /// Fixes the random generator for reproducible data.
    pub rng_seed: Option<u64>,
    /// Truncate both tables before inserting.
    pub reset: bool,
    pub show_progress: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            authors: 5000,
            books_per_author: 100,
            rng_seed: None,
            reset: false,
            show_progress: true,
        }
    }
}

/// Rows written by one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub authors: u64,
    pub books: u64,
}

/// Creates `authors` authors, each followed by one bulk insert of its books.
pub async fn seed(repo: &DbRepository, options: &SeedOptions) -> Result<SeedSummary, SeedError> {
    if options.reset {
        tracing::warn!("Removing all existing authors and books.");
        repo.truncate_all().await?;
    }

    let rng = match options.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut fake = FakeData::new(rng, Utc::now().date_naive());

    tracing::info!(
        authors = options.authors,
        books_per_author = options.books_per_author,
        "Creating authors and books..."
    );

    let progress_bar = if options.show_progress {
        let bar = ProgressBar::new(u64::from(options.authors));
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
                .progress_chars("#>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut summary = SeedSummary::default();
    for _ in 0..options.authors {
        let author = repo.create_author(&fake.name()).await?;
        summary.authors += 1;

        let books = fake.books(options.books_per_author as usize);
        summary.books += repo.bulk_insert_books(author.id, &books).await?;

        progress_bar.inc(1);
    }

    progress_bar.finish_with_message("done");
    tracing::info!(
        authors = summary.authors,
        books = summary.books,
        "Successfully populated the database!"
    );

    Ok(summary)
}
