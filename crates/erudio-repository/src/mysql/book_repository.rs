//! MySQL book repository implementation.

use crate::traits::{book_sort_column, BookRepository};
use crate::DatabasePool;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use erudio_core::{ErudioError, ErudioResult, Page, PageRequest};
use erudio_domain::Book;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

/// MySQL book repository implementation.
#[derive(Clone)]
pub struct MySqlBookRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlBookRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookRow {
    id: i64,
    author: String,
    launch_date: NaiveDateTime,
    price: f64,
    title: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: Some(row.id),
            author: row.author,
            launch_date: row.launch_date,
            price: row.price,
            title: row.title,
        }
    }
}

#[async_trait]
impl BookRepository for MySqlBookRepository {
    async fn find_by_id(&self, id: i64) -> ErudioResult<Option<Book>> {
        debug!("Finding book by id: {}", id);

        let row = sqlx::query_as::<_, BookRow>(
            "SELECT id, author, launch_date, price, title FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Book::from))
    }

    async fn find_all(&self, page: &PageRequest) -> ErudioResult<Page<Book>> {
        debug!("Finding all books, page: {}, size: {}", page.page, page.size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(self.pool.inner())
            .await?;

        let Some((limit, offset)) = page.sql_window(total as u64) else {
            return Ok(Page::empty(page, total as u64));
        };

        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT id, author, launch_date, price, title FROM books ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
            book_sort_column(&page.sort.property),
            page.direction().as_sql()
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.inner())
        .await?;

        let books = rows.into_iter().map(Book::from).collect();
        Ok(Page::new(books, page.page, page.size, total as u64))
    }

    async fn save(&self, book: &Book) -> ErudioResult<Book> {
        debug!("Saving book: {}", book.title);

        let result = sqlx::query(
            "INSERT INTO books (author, launch_date, price, title) VALUES (?, ?, ?, ?)",
        )
        .bind(&book.author)
        .bind(book.launch_date)
        .bind(book.price)
        .bind(&book.title)
        .execute(self.pool.inner())
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| ErudioError::internal("book id exceeds i64"))?;
        info!(id, "Book created");
        Ok(book.clone().with_id(id))
    }

    async fn update(&self, book: &Book) -> ErudioResult<Book> {
        let id = book
            .id
            .ok_or_else(|| ErudioError::internal("cannot update a book without an id"))?;
        debug!("Updating book: {}", id);

        let result = sqlx::query(
            "UPDATE books SET author = ?, launch_date = ?, price = ?, title = ? WHERE id = ?",
        )
        .bind(&book.author)
        .bind(book.launch_date)
        .bind(book.price)
        .bind(&book.title)
        .bind(id)
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 && self.find_by_id(id).await?.is_none() {
            return Err(ErudioError::not_found("Book", id));
        }

        info!(id, "Book updated");
        Ok(book.clone())
    }

    async fn delete(&self, id: i64) -> ErudioResult<bool> {
        debug!("Deleting book: {}", id);

        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> ErudioResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(self.pool.inner())
            .await?;
        Ok(count as u64)
    }
}
