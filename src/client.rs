//! Typed HTTP client for the Bookshelf API, used by front ends and tests

use anyhow::{bail, Context};
use reqwest::{Response, StatusCode};

use crate::{
    api::{books::DeleteResponse, catalog::CatalogSearchResponse},
    error::ErrorResponse,
    models::{Book, BookPayload, CatalogCandidate},
};

#[derive(Clone)]
pub struct BookshelfClient {
    url: String,
    client: reqwest::Client,
}

/// Message from an error body, or the bare status when there is none
async fn error_message(response: Response) -> String {
    let status = response.status();
    response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.to_string())
}

impl BookshelfClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Calls GET /records
    pub async fn list_books(&self) -> anyhow::Result<Vec<Book>> {
        let response = self
            .client
            .get(format!("{}/records", self.url))
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("Failed to fetch books: {}", error_message(response).await)
        }
        Ok(response.json().await?)
    }

    /// Calls GET /records/{id}
    /// Returns None if the book does not exist
    pub async fn get_book(&self, id: i32) -> anyhow::Result<Option<Book>> {
        let response = self
            .client
            .get(format!("{}/records/{}", self.url, id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else {
            bail!("Failed to fetch book: {}", error_message(response).await)
        }
    }

    /// Calls POST /records
    pub async fn create_book(&self, payload: &BookPayload) -> anyhow::Result<Book> {
        let response = self
            .client
            .post(format!("{}/records", self.url))
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("Failed to add book: {}", error_message(response).await)
        }
        Ok(response.json().await?)
    }

    /// Calls PUT /records/{id}
    pub async fn update_book(&self, id: i32, payload: &BookPayload) -> anyhow::Result<Book> {
        let response = self
            .client
            .put(format!("{}/records/{}", self.url, id))
            .json(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("Failed to update book: {}", error_message(response).await)
        }
        Ok(response.json().await?)
    }

    /// Calls DELETE /records/{id}
    pub async fn delete_book(&self, id: i32) -> anyhow::Result<String> {
        let response = self
            .client
            .delete(format!("{}/records/{}", self.url, id))
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("Failed to delete book: {}", error_message(response).await)
        }
        let body: DeleteResponse = response.json().await?;
        Ok(body.message)
    }

    /// Calls GET /catalog/search
    pub async fn search_catalog(&self, query: &str) -> anyhow::Result<Vec<CatalogCandidate>> {
        let response = self
            .client
            .get(format!("{}/catalog/search", self.url))
            .query(&[("q", query)])
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("Failed to search books: {}", error_message(response).await)
        }
        let body: CatalogSearchResponse = response.json().await?;
        Ok(body.items)
    }

    /// Calls POST /catalog/import
    pub async fn import(&self, candidate: &CatalogCandidate) -> anyhow::Result<Book> {
        let response = self
            .client
            .post(format!("{}/catalog/import", self.url))
            .json(candidate)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("Failed to add book: {}", error_message(response).await)
        }
        Ok(response.json().await?)
    }
}
