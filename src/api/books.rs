//! Book endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookSearchResponse, CreateBook, UpdateBook},
        MessageResponse, SearchRequest,
    },
    AppState,
};

use super::{ApiJson, ApiPath};

/// Add a book
#[utoipa::path(
    post,
    path = "/add_book",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book added, or `error` on duplicate/invalid input", body = MessageResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateBook>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.add(&data).await?;
    Ok(Json(MessageResponse::new("Book added successfully")))
}

/// List all books
#[utoipa::path(
    get,
    path = "/get_books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn get_books(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Update a book by ID; omitted fields are left unchanged
#[utoipa::path(
    put,
    path = "/update_book/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated, or `error` when not found", body = MessageResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(data): ApiJson<UpdateBook>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update(id, &data).await?;
    Ok(Json(MessageResponse::new("Book updated successfully")))
}

/// Delete a book by ID
#[utoipa::path(
    delete,
    path = "/delete_book/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted, or `error` when not found", body = MessageResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(id).await?;
    Ok(Json(MessageResponse::new("Book deleted successfully")))
}

/// Search books by title or author
#[utoipa::path(
    post,
    path = "/search_books",
    tag = "books",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matches, a no-match message, or `error` on empty query", body = BookSearchResponse)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> AppResult<Json<BookSearchResponse>> {
    let results = state.services.books.search(&request.query).await?;
    Ok(Json(results))
}
