//! # querylab Database Crate
//!
//! The application's interface to PostgreSQL. It owns the schema (through
//! embedded sqlx migrations), the connection pool, and every SQL statement the
//! service issues.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: pool creation and schema setup.
//! - `DbRepository`: bulk inserts for the seeder, counters, and the naive and
//!   optimized strategy of each scenario (`run_scenario` dispatches by enum).
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod scenarios;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{MIGRATOR, connect, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
pub use scenarios::{Fetched, ScenarioRows, ScenarioRun, group_books_by_author, published_after};
