//! Book records service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookSearchResponse, CreateBook, UpdateBook},
    repository::{books::DUPLICATE_BOOK, Repository},
};

use super::EMPTY_QUERY;

pub(crate) const BOOK_NOT_FOUND: &str = "Book not found";

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book unless one with the same title and author exists
    pub async fn add(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;

        let mut session = self.repository.open().await?;
        if session
            .books_find_by_title_author(&data.title, &data.author)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(DUPLICATE_BOOK.to_string()));
        }
        let book = session.books_create(data).await?;
        session.close(true).await?;

        tracing::info!("Book {} added: {:?} by {:?}", book.id, book.title, book.author);
        Ok(book)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let mut session = self.repository.open().await?;
        let books = session.books_list().await?;
        session.close(false).await?;
        Ok(books)
    }

    /// Partial update: fields missing from `data` keep their stored value
    pub async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        data.validate()?;

        let mut session = self.repository.open().await?;
        let current = session
            .books_get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;
        let updated = data.apply_to(&current);
        session.books_update(&updated).await?;
        session.close(true).await?;

        tracing::info!("Book {} updated", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut session = self.repository.open().await?;
        if !session.books_delete(id).await? {
            return Err(AppError::NotFound(BOOK_NOT_FOUND.to_string()));
        }
        session.close(true).await?;

        tracing::info!("Book {} deleted", id);
        Ok(())
    }

    pub async fn search(&self, query: &str) -> AppResult<BookSearchResponse> {
        if query.is_empty() {
            return Err(AppError::Validation(EMPTY_QUERY.to_string()));
        }

        let mut session = self.repository.open().await?;
        let books = session.books_search(query).await?;
        session.close(false).await?;

        tracing::debug!("Book search {:?}: {} match(es)", query, books.len());
        Ok(if books.is_empty() {
            BookSearchResponse::NoMatches {
                message: "No books found matching the query".to_string(),
            }
        } else {
            BookSearchResponse::Matches { books }
        })
    }
}
