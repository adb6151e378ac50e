//! The naive and optimized query strategy for each scenario.
//!
//! Every method reports how many SQL statements it issued alongside its rows,
//! which is what makes the N+1 pattern visible to a caller. Both strategies of
//! a scenario return identical rows in identical (primary-key) order.

use crate::{DbError, DbRepository};
use chrono::Datelike;
use core_types::{
    Author, AuthorBookCount, AuthorWithBooks, Book, BookWithAuthor, PUBLISHED_AFTER_YEAR,
    PublishedBook, Scenario, Strategy,
};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Rows produced by one strategy plus the number of statements it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub rows: Vec<T>,
    pub queries: u32,
}

/// The rows of any scenario. Serializes as a plain JSON list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScenarioRows {
    BooksWithAuthors(Vec<BookWithAuthor>),
    AuthorBookCounts(Vec<AuthorBookCount>),
    PublishedBooks(Vec<PublishedBook>),
    AuthorsWithBooks(Vec<AuthorWithBooks>),
}

impl ScenarioRows {
    pub fn len(&self) -> usize {
        match self {
            ScenarioRows::BooksWithAuthors(rows) => rows.len(),
            ScenarioRows::AuthorBookCounts(rows) => rows.len(),
            ScenarioRows::PublishedBooks(rows) => rows.len(),
            ScenarioRows::AuthorsWithBooks(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A timed execution of one (scenario, strategy) pair.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub scenario: Scenario,
    pub strategy: Strategy,
    pub rows: ScenarioRows,
    pub queries: u32,
    pub elapsed: Duration,
}

impl DbRepository {
    /// Runs one strategy of a scenario and measures its wall-clock time,
    /// including building the in-memory result.
    pub async fn run_scenario(
        &self,
        scenario: Scenario,
        strategy: Strategy,
    ) -> Result<ScenarioRun, DbError> {
        let start = Instant::now();

        let (rows, queries) = match (scenario, strategy) {
            (Scenario::NPlusOne, Strategy::Naive) => {
                let f = self.books_with_authors_naive().await?;
                (ScenarioRows::BooksWithAuthors(f.rows), f.queries)
            }
            (Scenario::NPlusOne, Strategy::Optimized) => {
                let f = self.books_with_authors_joined().await?;
                (ScenarioRows::BooksWithAuthors(f.rows), f.queries)
            }
            (Scenario::Aggregation, Strategy::Naive) => {
                let f = self.author_book_counts_naive().await?;
                (ScenarioRows::AuthorBookCounts(f.rows), f.queries)
            }
            (Scenario::Aggregation, Strategy::Optimized) => {
                let f = self.author_book_counts_annotated().await?;
                (ScenarioRows::AuthorBookCounts(f.rows), f.queries)
            }
            (Scenario::Filtering, Strategy::Naive) => {
                let f = self.books_published_after_naive(PUBLISHED_AFTER_YEAR).await?;
                (ScenarioRows::PublishedBooks(f.rows), f.queries)
            }
            (Scenario::Filtering, Strategy::Optimized) => {
                let f = self.books_published_after_filtered(PUBLISHED_AFTER_YEAR).await?;
                (ScenarioRows::PublishedBooks(f.rows), f.queries)
            }
            (Scenario::ManyToMany, Strategy::Naive) => {
                let f = self.authors_with_books_naive().await?;
                (ScenarioRows::AuthorsWithBooks(f.rows), f.queries)
            }
            (Scenario::ManyToMany, Strategy::Optimized) => {
                let f = self.authors_with_books_prefetched().await?;
                (ScenarioRows::AuthorsWithBooks(f.rows), f.queries)
            }
        };

        let elapsed = start.elapsed();
        tracing::debug!(%scenario, %strategy, rows = rows.len(), queries, ?elapsed, "Scenario finished.");

        Ok(ScenarioRun {
            scenario,
            strategy,
            rows,
            queries,
            elapsed,
        })
    }

    // --- N+1 ---

    /// Lists books, then looks up each book's author separately.
    pub async fn books_with_authors_naive(&self) -> Result<Fetched<BookWithAuthor>, DbError> {
        let books = self.list_books().await?;
        let mut queries = 1;

        let mut rows = Vec::with_capacity(books.len());
        for book in books {
            let author = self.author_name(book.author_id).await?;
            queries += 1;
            rows.push(BookWithAuthor {
                title: book.title,
                author,
            });
        }

        Ok(Fetched { rows, queries })
    }

    /// Fetches books and their authors' names in a single join.
    pub async fn books_with_authors_joined(&self) -> Result<Fetched<BookWithAuthor>, DbError> {
        let rows = sqlx::query_as::<_, BookWithAuthor>(
            r#"
            SELECT b.title, a.name AS author
            FROM books AS b
            JOIN authors AS a ON a.id = b.author_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Fetched { rows, queries: 1 })
    }

    // --- Aggregation ---

    /// Lists authors, then issues one `COUNT(*)` per author.
    pub async fn author_book_counts_naive(&self) -> Result<Fetched<AuthorBookCount>, DbError> {
        let authors = self.list_authors().await?;
        let mut queries = 1;

        let mut rows = Vec::with_capacity(authors.len());
        for author in authors {
            let book_count = self.count_books_for_author(author.id).await?;
            queries += 1;
            rows.push(AuthorBookCount {
                author: author.name,
                book_count,
            });
        }

        Ok(Fetched { rows, queries })
    }

    /// Counts every author's books with one grouped query. Authors without
    /// books are kept with a count of zero.
    pub async fn author_book_counts_annotated(&self) -> Result<Fetched<AuthorBookCount>, DbError> {
        let rows = sqlx::query_as::<_, AuthorBookCount>(
            r#"
            SELECT a.name AS author, COUNT(b.id) AS book_count
            FROM authors AS a
            LEFT JOIN books AS b ON b.author_id = a.id
            GROUP BY a.id, a.name
            ORDER BY a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(Fetched { rows, queries: 1 })
    }

    // --- Filtering ---

    /// Loads every book and keeps those published after `year` in memory.
    pub async fn books_published_after_naive(
        &self,
        year: i32,
    ) -> Result<Fetched<PublishedBook>, DbError> {
        let books = self.list_books().await?;
        Ok(Fetched {
            rows: published_after(books, year),
            queries: 1,
        })
    }

    /// Lets the database keep only books published after `year`.
    pub async fn books_published_after_filtered(
        &self,
        year: i32,
    ) -> Result<Fetched<PublishedBook>, DbError> {
        let rows = sqlx::query_as::<_, PublishedBook>(
            r#"
            SELECT title, published_date
            FROM books
            WHERE published_date > make_date($1, 12, 31)
            ORDER BY id
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        Ok(Fetched { rows, queries: 1 })
    }

    // --- Many-to-many ---

    /// Lists authors, then fetches each author's books separately.
    pub async fn authors_with_books_naive(&self) -> Result<Fetched<AuthorWithBooks>, DbError> {
        let authors = self.list_authors().await?;
        let mut queries = 1;

        let mut rows = Vec::with_capacity(authors.len());
        for author in authors {
            let books = self.book_titles_for_author(author.id).await?;
            queries += 1;
            rows.push(AuthorWithBooks {
                author: author.name,
                books,
            });
        }

        Ok(Fetched { rows, queries })
    }

    /// Lists authors, then fetches all of their books in one batched query.
    pub async fn authors_with_books_prefetched(&self) -> Result<Fetched<AuthorWithBooks>, DbError> {
        let authors = self.list_authors().await?;
        if authors.is_empty() {
            return Ok(Fetched {
                rows: Vec::new(),
                queries: 1,
            });
        }

        let author_ids: Vec<i64> = authors.iter().map(|a| a.id).collect();
        let books = self.books_for_authors(&author_ids).await?;

        Ok(Fetched {
            rows: group_books_by_author(authors, books),
            queries: 2,
        })
    }
}

/// Keeps books whose publication year is strictly greater than `year`,
/// preserving their order.
pub fn published_after(books: Vec<Book>, year: i32) -> Vec<PublishedBook> {
    books
        .into_iter()
        .filter(|book| book.published_date.year() > year)
        .map(|book| PublishedBook {
            title: book.title,
            published_date: book.published_date,
        })
        .collect()
}

/// Attaches prefetched books to their authors. Author order is preserved and
/// each author's titles keep the order they arrived in.
pub fn group_books_by_author(authors: Vec<Author>, books: Vec<Book>) -> Vec<AuthorWithBooks> {
    let mut by_author: HashMap<i64, Vec<String>> = HashMap::with_capacity(authors.len());
    for book in books {
        by_author.entry(book.author_id).or_default().push(book.title);
    }

    authors
        .into_iter()
        .map(|author| AuthorWithBooks {
            books: by_author.remove(&author.id).unwrap_or_default(),
            author: author.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn book(id: i64, author_id: i64, title: &str, date: (i32, u32, u32)) -> Book {
        Book {
            id,
            title: title.to_string(),
            published_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            author_id,
        }
    }

    fn author(id: i64, name: &str) -> Author {
        Author {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn published_after_is_strict_on_the_year() {
        let books = vec![
            book(1, 1, "Old.", (2015, 12, 31)),
            book(2, 1, "New.", (2016, 1, 1)),
            book(3, 2, "Older.", (1999, 6, 15)),
            book(4, 2, "Newer.", (2023, 8, 2)),
        ];

        let titles: Vec<_> = published_after(books, 2015)
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["New.", "Newer."]);
    }

    #[test]
    fn grouping_keeps_author_and_book_order() {
        let authors = vec![author(3, "Cleo"), author(1, "Abe"), author(2, "Bea")];
        let books = vec![
            book(10, 1, "A1.", (2001, 1, 1)),
            book(11, 3, "C1.", (2002, 1, 1)),
            book(12, 1, "A2.", (2003, 1, 1)),
            book(13, 3, "C2.", (2004, 1, 1)),
        ];

        let grouped = group_books_by_author(authors, books);
        assert_eq!(
            grouped,
            vec![
                AuthorWithBooks {
                    author: "Cleo".to_string(),
                    books: vec!["C1.".to_string(), "C2.".to_string()],
                },
                AuthorWithBooks {
                    author: "Abe".to_string(),
                    books: vec!["A1.".to_string(), "A2.".to_string()],
                },
                AuthorWithBooks {
                    author: "Bea".to_string(),
                    books: vec![],
                },
            ]
        );
    }

    #[test]
    fn grouping_ignores_books_of_unlisted_authors() {
        let grouped = group_books_by_author(vec![author(1, "Abe")], vec![book(1, 9, "X.", (2000, 1, 1))]);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].books.is_empty());
    }

    #[test]
    fn rows_serialize_as_a_plain_list() {
        let rows = ScenarioRows::AuthorBookCounts(vec![AuthorBookCount {
            author: "Abe".to_string(),
            book_count: 3,
        }]);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            serde_json::to_value(&rows).unwrap(),
            serde_json::json!([{ "author": "Abe", "book_count": 3 }])
        );
    }
}
