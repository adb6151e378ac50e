use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// The year the filtering scenario compares against (strictly greater).
pub const PUBLISHED_AFTER_YEAR: i32 = 2015;

/// A row from the `authors` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// A row from the `books` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub published_date: NaiveDate,
    pub author_id: i64,
}

/// A book that has not been inserted yet. The author is supplied at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub published_date: NaiveDate,
}

// --- Response rows ---

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct BookWithAuthor {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AuthorBookCount {
    pub author: String,
    pub book_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PublishedBook {
    pub title: String,
    pub published_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorWithBooks {
    pub author: String,
    pub books: Vec<String>,
}
