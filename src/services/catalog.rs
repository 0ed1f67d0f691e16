//! Catalog search service
//!
//! Searches an external book catalog (Google Books volumes API) and imports a
//! chosen hit through the record service. The catalog itself is read-only.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        catalog::{CatalogCandidate, VolumesResponse},
        Book,
    },
};

use super::books::BooksService;

/// Upper bound on hits returned by a single search
pub const MAX_SEARCH_RESULTS: u32 = 12;

/// A searchable external book catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<CatalogCandidate>>;
}

/// Google Books volumes API client
pub struct GoogleBooksSource {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleBooksSource {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogSource for GoogleBooksSource {
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<CatalogCandidate>> {
        let max_results = max_results.to_string();
        let response = self
            .client
            .get(format!("{}/volumes", self.base_url))
            .query(&[("q", query), ("maxResults", max_results.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let volumes: VolumesResponse = response.json().await?;
        tracing::debug!(
            "Catalog returned {} of {} volumes",
            volumes.items.len(),
            volumes.total_items
        );

        Ok(volumes
            .items
            .into_iter()
            .map(CatalogCandidate::from)
            .collect())
    }
}

#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    books: BooksService,
    max_results: u32,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>, books: BooksService, max_results: u32) -> Self {
        Self {
            source,
            books,
            max_results: max_results.clamp(1, MAX_SEARCH_RESULTS),
        }
    }

    /// Free-text search. A blank query returns nothing without calling out.
    pub async fn search(&self, query: &str) -> AppResult<Vec<CatalogCandidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        tracing::info!("Catalog search started");
        tracing::debug!("Search query: {}", query);

        let mut candidates = self.source.search(query, self.max_results).await?;
        candidates.truncate(self.max_results as usize);
        Ok(candidates)
    }

    /// Create a library record from one search hit
    pub async fn import(&self, candidate: &CatalogCandidate) -> AppResult<Book> {
        tracing::info!("Importing catalog volume {}", candidate.id);
        self.books.create(candidate.to_book_payload()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::BookStatus, repository::Repository};
    use mockall::predicate::eq;

    fn candidate(id: usize) -> CatalogCandidate {
        CatalogCandidate {
            id: format!("vol-{}", id),
            title: format!("Volume {}", id),
            authors: vec![],
            description: None,
            thumbnail: None,
            published_date: Some("2001-05".to_string()),
            page_count: Some(100),
            industry_identifiers: vec![],
        }
    }

    fn service_with(source: MockCatalogSource) -> (CatalogService, BooksService) {
        let books = BooksService::new(Repository::in_memory());
        (CatalogService::new(Arc::new(source), books.clone(), 12), books)
    }

    #[tokio::test]
    async fn test_search_caps_results() {
        let mut source = MockCatalogSource::new();
        source
            .expect_search()
            .with(eq("dune"), eq(12))
            .times(1)
            .returning(|_, _| Ok((0..20).map(candidate).collect()));

        let (catalog, _) = service_with(source);
        let results = catalog.search("  dune ").await.unwrap();
        assert_eq!(results.len(), 12);
    }

    #[tokio::test]
    async fn test_blank_query_skips_upstream() {
        let mut source = MockCatalogSource::new();
        source.expect_search().never();

        let (catalog, _) = service_with(source);
        assert!(catalog.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_reported() {
        let mut source = MockCatalogSource::new();
        source
            .expect_search()
            .returning(|_, _| Err(AppError::Upstream("connection refused".to_string())));

        let (catalog, _) = service_with(source);
        assert!(matches!(catalog.search("dune").await, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_import_creates_record() {
        let (catalog, books) = service_with(MockCatalogSource::new());

        let imported = catalog.import(&candidate(1)).await.unwrap();
        assert_eq!(imported.title, "Volume 1");
        assert_eq!(imported.author, "Unknown Author");
        assert_eq!(imported.publish_year, Some(2001));
        assert_eq!(imported.pages, Some(100));
        assert_eq!(imported.status, BookStatus::WantToRead);

        let listed = books.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, imported.id);
    }
}
