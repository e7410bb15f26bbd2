//! API handlers for the library REST endpoints
//!
//! Every route answers with HTTP 200 and a JSON object; failures carry an
//! `error` key (see [`crate::error::ErrorResponse`]).

pub mod books;
pub mod health;
pub mod members;
pub mod openapi;

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// JSON body extractor whose rejections use the error body shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections use the error body shape
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/add_book", post(books::add_book))
        .route("/get_books", get(books::get_books))
        .route("/update_book/:id", put(books::update_book))
        .route("/delete_book/:id", delete(books::delete_book))
        .route("/search_books", post(books::search_books))
        // Members
        .route("/add_member", post(members::add_member))
        .route("/get_members", get(members::get_members))
        .route("/update_member", put(members::update_member))
        .route("/delete_member", delete(members::delete_member))
        .route("/search_members", post(members::search_members))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
