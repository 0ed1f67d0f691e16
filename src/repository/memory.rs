//! In-memory books repository, used by tests and `database.backend = "memory"`

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook},
};

use super::BookStore;

#[derive(Default)]
struct MemoryState {
    last_id: i32,
    books: BTreeMap<i32, Book>,
}

#[derive(Default)]
pub struct InMemoryBooksRepository {
    state: RwLock<MemoryState>,
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[async_trait]
impl BookStore for InMemoryBooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let state = self.state.read().await;
        let mut books: Vec<Book> = state.books.values().cloned().collect();
        books.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(books)
    }

    async fn get(&self, id: i32) -> AppResult<Book> {
        self.state
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let now = Utc::now();
        let created = Book {
            id: state.last_id,
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            rating: book.rating,
            status: book.status,
            review: book.review.clone(),
            cover_url: book.cover_url.clone(),
            isbn: book.isbn.clone(),
            publish_year: book.publish_year,
            pages: book.pages,
            created_at: now,
            updated_at: now,
        };
        state.books.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, book: &NewBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        let existing = state.books.get_mut(&id).ok_or_else(|| not_found(id))?;

        existing.title = book.title.clone();
        existing.author = book.author.clone();
        existing.description = book.description.clone();
        existing.rating = book.rating;
        existing.status = book.status;
        existing.review = book.review.clone();
        existing.cover_url = book.cover_url.clone();
        existing.isbn = book.isbn.clone();
        existing.publish_year = book.publish_year;
        existing.pages = book.pages;
        existing.updated_at = Utc::now();

        Ok(existing.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.state
            .write()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
