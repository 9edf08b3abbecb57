//! services/api/src/web/books.rs
//!
//! Axum handlers for the book endpoints. These mirror the course endpoints,
//! minus the slug and archive machinery: books are looked up by id only and
//! deleted physically.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use all_islam_core::domain::{Book, BookPatch, NewBook};

use crate::web::error::{parse_id, ApiJson, WebError};
use crate::web::state::AppState;

/// List every book in the library.
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books", body = [Book])
    )
)]
pub async fn list_books_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Book>>, WebError> {
    let books = state.store.list_books().await?;
    Ok(Json(books))
}

/// Look a book up by its id.
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No book with that id")
    )
)]
pub async fn get_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Book>, WebError> {
    let id = parse_id(&id)?;
    let book = state.store.get_book(id).await?;
    Ok(Json(book))
}

/// Create a book, with or without an attached file.
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = NewBook,
    responses(
        (status = 200, description = "The created book", body = Book),
        (status = 400, description = "Invalid book data")
    )
)]
pub async fn create_book_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(new): ApiJson<NewBook>,
) -> Result<Json<Book>, WebError> {
    let book = state.store.create_book(new).await?;
    Ok(Json(book))
}

/// Apply a partial update to a book, e.g. attaching an uploaded file.
#[utoipa::path(
    patch,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    request_body = BookPatch,
    responses(
        (status = 200, description = "The updated book", body = Book),
        (status = 400, description = "Non-numeric id or invalid body"),
        (status = 404, description = "No book with that id")
    )
)]
pub async fn update_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<BookPatch>,
) -> Result<Json<Book>, WebError> {
    let id = parse_id(&id)?;
    let book = state.store.update_book(id, patch).await?;
    Ok(Json(book))
}

/// Delete a book. The uploaded file, if any, stays on disk.
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No book with that id")
    )
)]
pub async fn delete_book_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, WebError> {
    let id = parse_id(&id)?;
    state.store.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
