//! Data models for Bookshelf

pub mod book;
pub mod catalog;

// Re-export commonly used types
pub use book::{Book, BookPayload, BookStatus, NewBook};
pub use catalog::CatalogCandidate;
