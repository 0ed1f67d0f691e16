//! Record service: CRUD over the book store

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

/// Parse a path identifier. Anything that is not a record id cannot name a
/// record, so it is reported as not found.
pub fn parse_book_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all books, newest first
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        tracing::debug!("Listing books");
        self.repository.books.list().await
    }

    /// Get book by ID
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        tracing::debug!("Fetching book {}", id);
        self.repository.books.get(id).await
    }

    /// Create a book. Title and author are required; numeric fields are
    /// coerced leniently.
    pub async fn create(&self, payload: BookPayload) -> AppResult<Book> {
        let book = payload.into_new_book()?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!("Book created: id={} title={:?}", created.id, created.title);
        Ok(created)
    }

    /// Replace every mutable field of an existing book
    pub async fn update(&self, id: i32, payload: BookPayload) -> AppResult<Book> {
        let book = payload.into_new_book()?;
        let updated = self.repository.books.update(id, &book).await?;
        tracing::info!("Book updated: id={}", id);
        Ok(updated)
    }

    /// Delete a book permanently
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }
}
