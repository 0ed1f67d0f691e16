//! Repository layer for book persistence

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

pub use books::PgBooksRepository;
pub use memory::InMemoryBooksRepository;

/// Single-table store of book records.
///
/// Every method is one single-row read or write; `update` and `delete`
/// return `AppError::NotFound` when the id matches nothing.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All records, newest first
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get(&self, id: i32) -> AppResult<Book>;

    /// Insert a record, assigning its id and both timestamps
    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    /// Replace every mutable field and refresh `updated_at`
    async fn update(&self, id: i32, book: &NewBook) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Round trip to the backing store, used by the readiness check
    async fn ping(&self) -> AppResult<()>;
}

/// Process-wide handle to the store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBooksRepository::new(pool)),
        }
    }

    /// Create a repository that keeps records in process memory
    pub fn in_memory() -> Self {
        Self {
            books: Arc::new(InMemoryBooksRepository::default()),
        }
    }
}
