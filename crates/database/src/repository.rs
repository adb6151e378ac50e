use crate::DbError;
use core_types::{Author, Book, NewBook};
use sqlx::postgres::{PgPool, Postgres};
use sqlx::QueryBuilder;

/// PostgreSQL accepts at most 65535 bind parameters per statement; each book uses three.
const BOOKS_PER_INSERT: usize = 10_000;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pub(crate) pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a single author and returns it with its generated id.
    pub async fn create_author(&self, name: &str) -> Result<Author, DbError> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(author)
    }

    /// Inserts all books for one author with multi-row `INSERT` statements.
    ///
    /// Returns the number of rows written. Batches are not wrapped in a
    /// transaction, so a failure leaves earlier batches in place.
    pub async fn bulk_insert_books(&self, author_id: i64, books: &[NewBook]) -> Result<u64, DbError> {
        let mut inserted = 0;

        for chunk in books.chunks(BOOKS_PER_INSERT) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO books (title, published_date, author_id) ");
            builder.push_values(chunk, |mut row, book| {
                row.push_bind(book.title.clone())
                    .push_bind(book.published_date)
                    .push_bind(author_id);
            });

            let result = builder.build().execute(&self.pool).await?;
            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    pub async fn count_authors(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_books(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Removes every author and book and restarts the id sequences.
    pub async fn truncate_all(&self) -> Result<(), DbError> {
        sqlx::query("TRUNCATE books, authors RESTART IDENTITY")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Fetches every author in primary-key order.
    pub async fn list_authors(&self) -> Result<Vec<Author>, DbError> {
        let authors = sqlx::query_as::<_, Author>("SELECT id, name FROM authors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }

    /// Fetches every book in primary-key order, without its author.
    pub async fn list_books(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, published_date, author_id FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Looks up one author's name by id.
    pub async fn author_name(&self, author_id: i64) -> Result<String, DbError> {
        sqlx::query_scalar::<_, String>("SELECT name FROM authors WHERE id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => DbError::NotFound(format!("author {author_id}")),
                other => other.into(),
            })
    }

    /// Counts the books of a single author.
    pub async fn count_books_for_author(&self, author_id: i64) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Titles of a single author's books in primary-key order.
    pub async fn book_titles_for_author(&self, author_id: i64) -> Result<Vec<String>, DbError> {
        let titles = sqlx::query_scalar::<_, String>(
            "SELECT title FROM books WHERE author_id = $1 ORDER BY id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(titles)
    }

    /// Every book belonging to any of the given authors, in one query.
    pub async fn books_for_authors(&self, author_ids: &[i64]) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, published_date, author_id FROM books WHERE author_id = ANY($1) ORDER BY id",
        )
        .bind(author_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}
