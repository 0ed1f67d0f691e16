//! Business logic services

pub mod books;
pub mod catalog;

use std::sync::Arc;

use crate::{config::CatalogConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository, searching Google Books
    pub fn new(repository: Repository, catalog_config: &CatalogConfig) -> AppResult<Self> {
        let source = catalog::GoogleBooksSource::new(catalog_config)?;
        Ok(Self::with_catalog_source(
            repository,
            Arc::new(source),
            catalog_config.max_results,
        ))
    }

    /// Create all services with an explicit catalog source
    pub fn with_catalog_source(
        repository: Repository,
        source: Arc<dyn catalog::CatalogSource>,
        max_results: u32,
    ) -> Self {
        let books = books::BooksService::new(repository);
        Self {
            catalog: catalog::CatalogService::new(source, books.clone(), max_results),
            books,
        }
    }
}
