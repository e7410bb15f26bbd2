//! Book row access on a store session

use super::{like_pattern, Session};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
};

pub(crate) const DUPLICATE_BOOK: &str = "Book with the same title and author already exists";

impl Session {
    /// List all books
    pub async fn books_list(&mut self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(self.conn())
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn books_get_by_id(&mut self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(self.conn())
            .await?;
        Ok(book)
    }

    /// Exact (title, author) lookup used for duplicate detection
    pub async fn books_find_by_title_author(
        &mut self,
        title: &str,
        author: &str,
    ) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE title = ? AND author = ?")
            .bind(title)
            .bind(author)
            .fetch_optional(self.conn())
            .await?;
        Ok(book)
    }

    /// Insert a book
    pub async fn books_create(&mut self, data: &CreateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, year_of_publication, book_count)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.year_of_publication)
        .bind(data.book_count)
        .fetch_one(self.conn())
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_BOOK))
    }

    /// Overwrite every column of an existing book
    pub async fn books_update(&mut self, book: &Book) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, year_of_publication = ?, book_count = ?
            WHERE id = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.year_of_publication)
        .bind(book.book_count)
        .bind(book.id)
        .execute(self.conn())
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_BOOK))?;
        Ok(())
    }

    /// Delete a book, returning whether a row went away
    pub async fn books_delete(&mut self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(self.conn())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search on title or author
    pub async fn books_search(&mut self, query: &str) -> AppResult<Vec<Book>> {
        let pattern = like_pattern(query);
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE LOWER(title) LIKE LOWER(?) ESCAPE '\' OR LOWER(author) LIKE LOWER(?) ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.conn())
        .await?;
        Ok(rows)
    }
}
