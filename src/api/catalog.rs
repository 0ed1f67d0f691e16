//! External catalog search endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::AppJson,
    error::AppResult,
    models::{Book, CatalogCandidate},
};

/// Catalog search query parameters
#[derive(Deserialize, IntoParams, ToSchema, Debug)]
pub struct CatalogSearchQuery {
    /// Free-text query
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CatalogSearchResponse {
    /// Number of hits returned
    pub total: usize,
    pub items: Vec<CatalogCandidate>,
}

/// Search the external book catalog
#[utoipa::path(
    get,
    path = "/catalog/search",
    tag = "catalog",
    params(CatalogSearchQuery),
    responses(
        (status = 200, description = "Search results", body = CatalogSearchResponse),
        (status = 502, description = "Catalog unavailable")
    )
)]
pub async fn search(
    State(state): State<crate::AppState>,
    Query(query): Query<CatalogSearchQuery>,
) -> AppResult<Json<CatalogSearchResponse>> {
    let items = state.services.catalog.search(&query.q).await?;

    Ok(Json(CatalogSearchResponse {
        total: items.len(),
        items,
    }))
}

/// Import a search hit into the library
#[utoipa::path(
    post,
    path = "/catalog/import",
    tag = "catalog",
    request_body = CatalogCandidate,
    responses(
        (status = 201, description = "Book imported", body = Book),
        (status = 400, description = "Hit has no title")
    )
)]
pub async fn import(
    State(state): State<crate::AppState>,
    AppJson(candidate): AppJson<CatalogCandidate>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.catalog.import(&candidate).await?;
    Ok((StatusCode::CREATED, Json(book)))
}
