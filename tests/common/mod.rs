//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use bookshelf_server::{
    api,
    error::{AppError, AppResult},
    models::CatalogCandidate,
    repository::Repository,
    services::{catalog::CatalogSource, Services},
    AppConfig, AppState,
};

/// Catalog that answers every query with the same hits, or fails
pub struct FixedCatalog {
    pub hits: Vec<CatalogCandidate>,
    pub fail: bool,
}

#[async_trait]
impl CatalogSource for FixedCatalog {
    async fn search(&self, _query: &str, max_results: u32) -> AppResult<Vec<CatalogCandidate>> {
        if self.fail {
            return Err(AppError::Upstream("catalog offline".to_string()));
        }
        Ok(self.hits.iter().take(max_results as usize).cloned().collect())
    }
}

pub fn candidate(id: &str, title: &str, authors: &[&str]) -> CatalogCandidate {
    CatalogCandidate {
        id: id.to_string(),
        title: title.to_string(),
        authors: authors.iter().map(|a| a.to_string()).collect(),
        description: Some(format!("About {}", title)),
        thumbnail: Some(format!("http://covers/{}.jpg", id)),
        published_date: Some("1965-08-01".to_string()),
        page_count: Some(412),
        industry_identifiers: vec![],
    }
}

/// Router over an empty in-memory store
pub fn test_app(catalog: FixedCatalog) -> Router {
    let config = AppConfig::in_memory();
    let repository = Repository::in_memory();
    let services = Services::with_catalog_source(
        repository.clone(),
        Arc::new(catalog),
        config.catalog.max_results,
    );
    api::create_router(AppState::new(config, repository, services))
}

pub fn default_catalog() -> FixedCatalog {
    FixedCatalog {
        hits: vec![
            candidate("dune", "Dune", &["Frank Herbert"]),
            candidate("anon", "Beowulf", &[]),
        ],
        fail: false,
    }
}

/// Serve the app on an ephemeral local port and return its base URL
pub async fn spawn_app(catalog: FixedCatalog) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    let app = test_app(catalog);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    format!("http://{}", addr)
}
