//! Book API endpoints

use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Redirect,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookId, CreateBook, UpdateBook},
    AppState,
};

/// Send the API root to the interactive documentation
pub async fn redirect_to_docs() -> Redirect {
    Redirect::to("/docs")
}

/// List all books, keyed by id
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books keyed by id", body = BTreeMap<String, Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<BTreeMap<BookId, Book>> {
    Json(state.services.books.list().await)
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Malformed book ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    book_id: Result<Path<BookId>, PathRejection>,
) -> AppResult<Json<Book>> {
    let Path(id) = book_id?;
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    params(CreateBook),
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing parameter", body = crate::error::ErrorResponse),
        (status = 409, description = "A book with this name already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    query: Result<Query<CreateBook>, QueryRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let Query(data) = query?;
    let book = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book; omitted or empty fields are left unchanged
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID"),
        UpdateBook
    ),
    responses(
        (status = 200, description = "Confirmation message", body = String),
        (status = 400, description = "Malformed book ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    book_id: Result<Path<BookId>, PathRejection>,
    query: Result<Query<UpdateBook>, QueryRejection>,
) -> AppResult<Json<String>> {
    let Path(id) = book_id?;
    let Query(data) = query?;
    let message = state.services.books.update(id, &data).await?;
    Ok(Json(message))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(("book_id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Malformed book ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    book_id: Result<Path<BookId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = book_id?;
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
