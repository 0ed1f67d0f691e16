//! Book record endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::AppJson,
    error::AppResult,
    models::{Book, BookPayload},
    services::books::parse_book_id,
};

/// Confirmation returned by a successful delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// List all books, newest first
#[utoipa::path(
    get,
    path = "/records",
    tag = "records",
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/records/{id}",
    tag = "records",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(parse_book_id(&id)?).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/records",
    tag = "records",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Title or author missing")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AppJson(payload): AppJson<BookPayload>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.books.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace all fields of an existing book
#[utoipa::path(
    put,
    path = "/records/{id}",
    tag = "records",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Title or author missing"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<BookPayload>,
) -> AppResult<Json<Book>> {
    let updated = state
        .services
        .books
        .update(parse_book_id(&id)?, payload)
        .await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/records/{id}",
    tag = "records",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = DeleteResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.books.delete(parse_book_id(&id)?).await?;
    Ok(Json(DeleteResponse {
        message: "Book deleted successfully".to_string(),
    }))
}
