//! # querylab Core Types
//!
//! Layer 0 of the workspace: the entities stored in the database, the rows the
//! HTTP endpoints return, and the enums naming each scenario and strategy.
//! This crate performs no I/O.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Scenario, Strategy};
pub use error::CoreError;
pub use structs::{
    Author, AuthorBookCount, AuthorWithBooks, Book, BookWithAuthor, NewBook, PublishedBook,
    PUBLISHED_AFTER_YEAR,
};
