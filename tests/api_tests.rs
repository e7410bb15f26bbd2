//! API tests against an in-memory store

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_server::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository::Repository,
    AppState,
};

async fn test_app() -> Router {
    let database = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let repository = Repository::connect(&database)
        .await
        .expect("Failed to open in-memory database");
    repository
        .init_schema()
        .await
        .expect("Failed to create schema");
    api::create_router(AppState::new(AppConfig::default(), repository))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Value {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    // Outcome is signalled in the body, never by status
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse response")
}

fn dune() -> Value {
    json!({
        "title": "Dune",
        "author": "Herbert",
        "year_of_publication": 1965,
        "book_count": 3
    })
}

async fn add_alice(app: &Router) {
    let body = send(
        app,
        "POST",
        "/add_member",
        Some(json!({ "name": "Alice", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(body["message"], "Member added successfully");
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let body = send(&app, "GET", "/health", None).await;
    assert_eq!(body["status"], "healthy");

    let body = send(&app, "GET", "/ready", None).await;
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_add_then_list_books() {
    let app = test_app().await;

    let body = send(&app, "POST", "/add_book", Some(dune())).await;
    assert_eq!(body, json!({ "message": "Book added successfully" }));

    let books = send(&app, "GET", "/get_books", None).await;
    let books = books.as_array().expect("get_books returns a list");
    assert_eq!(books.len(), 1);
    assert!(books[0]["id"].is_i64());
    assert_eq!(books[0]["title"], "Dune");
    assert_eq!(books[0]["author"], "Herbert");
    assert_eq!(books[0]["year_of_publication"], 1965);
    assert_eq!(books[0]["book_count"], 3);
}

#[tokio::test]
async fn test_duplicate_book_rejected() {
    let app = test_app().await;
    send(&app, "POST", "/add_book", Some(dune())).await;

    let mut again = dune();
    again["book_count"] = json!(9);
    let body = send(&app, "POST", "/add_book", Some(again)).await;
    assert_eq!(body["error"], "Book with the same title and author already exists");
    assert!(body.get("message").is_none());

    let books = send(&app, "GET", "/get_books", None).await;
    assert_eq!(books.as_array().map(Vec::len), Some(1));
    assert_eq!(books[0]["book_count"], 3);
}

#[tokio::test]
async fn test_same_title_other_author_is_allowed() {
    let app = test_app().await;
    send(&app, "POST", "/add_book", Some(dune())).await;

    let mut other = dune();
    other["author"] = json!("Someone Else");
    let body = send(&app, "POST", "/add_book", Some(other)).await;
    assert_eq!(body["message"], "Book added successfully");
}

#[tokio::test]
async fn test_add_book_missing_field() {
    let app = test_app().await;

    let body = send(
        &app,
        "POST",
        "/add_book",
        Some(json!({ "title": "Dune", "author": "Herbert", "book_count": 3 })),
    )
    .await;
    assert!(body["error"].is_string());

    let books = send(&app, "GET", "/get_books", None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn test_add_book_empty_title() {
    let app = test_app().await;

    let mut book = dune();
    book["title"] = json!("");
    let body = send(&app, "POST", "/add_book", Some(book)).await;
    assert_eq!(body["error"], "Title is required");
}

#[tokio::test]
async fn test_update_book_count_only() {
    let app = test_app().await;
    send(&app, "POST", "/add_book", Some(dune())).await;
    let books = send(&app, "GET", "/get_books", None).await;
    let id = books[0]["id"].as_i64().expect("No book ID");

    let body = send(
        &app,
        "PUT",
        &format!("/update_book/{}", id),
        Some(json!({ "book_count": 10 })),
    )
    .await;
    assert_eq!(body["message"], "Book updated successfully");

    let books = send(&app, "GET", "/get_books", None).await;
    assert_eq!(
        books,
        json!([{
            "id": id,
            "title": "Dune",
            "author": "Herbert",
            "year_of_publication": 1965,
            "book_count": 10
        }])
    );
}

#[tokio::test]
async fn test_update_and_delete_unknown_book() {
    let app = test_app().await;
    send(&app, "POST", "/add_book", Some(dune())).await;
    let before = send(&app, "GET", "/get_books", None).await;

    let body = send(&app, "PUT", "/update_book/999", Some(json!({ "title": "X" }))).await;
    assert_eq!(body["error"], "Book not found");

    let body = send(&app, "DELETE", "/delete_book/999", None).await;
    assert_eq!(body["error"], "Book not found");

    let after = send(&app, "GET", "/get_books", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_non_numeric_book_id() {
    let app = test_app().await;

    let body = send(&app, "DELETE", "/delete_book/abc", None).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_delete_book() {
    let app = test_app().await;
    send(&app, "POST", "/add_book", Some(dune())).await;
    let books = send(&app, "GET", "/get_books", None).await;
    let id = books[0]["id"].as_i64().expect("No book ID");

    let body = send(&app, "DELETE", &format!("/delete_book/{}", id), None).await;
    assert_eq!(body["message"], "Book deleted successfully");

    let books = send(&app, "GET", "/get_books", None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn test_search_books() {
    let app = test_app().await;
    send(&app, "POST", "/add_book", Some(dune())).await;

    let body = send(&app, "POST", "/search_books", Some(json!({ "query": "dun" }))).await;
    let books = body["books"].as_array().expect("No books in response");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Dune");

    // Author matches too
    let body = send(&app, "POST", "/search_books", Some(json!({ "query": "HERB" }))).await;
    assert_eq!(body["books"].as_array().map(Vec::len), Some(1));

    let body = send(&app, "POST", "/search_books", Some(json!({ "query": "tolkien" }))).await;
    assert_eq!(body, json!({ "message": "No books found matching the query" }));

    let body = send(&app, "POST", "/search_books", Some(json!({ "query": "%" }))).await;
    assert_eq!(body["message"], "No books found matching the query");
}

#[tokio::test]
async fn test_search_books_empty_query() {
    let app = test_app().await;

    let body = send(&app, "POST", "/search_books", Some(json!({ "query": "" }))).await;
    assert_eq!(body["error"], "Please provide a search query");

    let body = send(&app, "POST", "/search_books", Some(json!({}))).await;
    assert_eq!(body["error"], "Please provide a search query");
}

#[tokio::test]
async fn test_add_then_list_members() {
    let app = test_app().await;
    add_alice(&app).await;

    let members = send(&app, "GET", "/get_members", None).await;
    let members = members.as_array().expect("get_members returns a list");
    assert_eq!(members.len(), 1);
    assert!(members[0]["id"].is_i64());
    assert_eq!(members[0]["name"], "Alice");
    assert_eq!(members[0]["email"], "a@x.com");
}

#[tokio::test]
async fn test_duplicate_member_email() {
    let app = test_app().await;
    add_alice(&app).await;

    let body = send(
        &app,
        "POST",
        "/add_member",
        Some(json!({ "name": "Other Alice", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(body["error"], "Email already exists");

    let members = send(&app, "GET", "/get_members", None).await;
    assert_eq!(members.as_array().map(Vec::len), Some(1));
    assert_eq!(members[0]["name"], "Alice");
}

#[tokio::test]
async fn test_update_member_without_name_keeps_name() {
    let app = test_app().await;
    add_alice(&app).await;

    let body = send(&app, "PUT", "/update_member", Some(json!({ "email": "a@x.com" }))).await;
    assert_eq!(body["message"], "Member updated successfully");

    let members = send(&app, "GET", "/get_members", None).await;
    assert_eq!(members[0]["name"], "Alice");
}

#[tokio::test]
async fn test_update_member_name() {
    let app = test_app().await;
    add_alice(&app).await;

    let body = send(
        &app,
        "PUT",
        "/update_member",
        Some(json!({ "email": "a@x.com", "name": "Alicia" })),
    )
    .await;
    assert_eq!(body["message"], "Member updated successfully");

    let members = send(&app, "GET", "/get_members", None).await;
    assert_eq!(members[0]["name"], "Alicia");
    assert_eq!(members[0]["email"], "a@x.com");
}

#[tokio::test]
async fn test_member_email_required() {
    let app = test_app().await;

    let body = send(&app, "PUT", "/update_member", Some(json!({ "name": "Bob" }))).await;
    assert_eq!(body["error"], "Email is required");

    let body = send(&app, "DELETE", "/delete_member", Some(json!({}))).await;
    assert_eq!(body["error"], "Email is required");
}

#[tokio::test]
async fn test_update_and_delete_unknown_member() {
    let app = test_app().await;
    add_alice(&app).await;

    let body = send(
        &app,
        "PUT",
        "/update_member",
        Some(json!({ "email": "nobody@x.com", "name": "Bob" })),
    )
    .await;
    assert_eq!(body["error"], "Member not found");

    let body = send(&app, "DELETE", "/delete_member", Some(json!({ "email": "nobody@x.com" }))).await;
    assert_eq!(body["error"], "Member not found");

    let members = send(&app, "GET", "/get_members", None).await;
    assert_eq!(members.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_delete_member() {
    let app = test_app().await;
    add_alice(&app).await;

    let body = send(&app, "DELETE", "/delete_member", Some(json!({ "email": "a@x.com" }))).await;
    assert_eq!(body["message"], "Member deleted successfully");

    let members = send(&app, "GET", "/get_members", None).await;
    assert_eq!(members, json!([]));
}

#[tokio::test]
async fn test_search_members() {
    let app = test_app().await;
    add_alice(&app).await;

    let body = send(&app, "POST", "/search_members", Some(json!({ "query": "ali" }))).await;
    let members = body["members"].as_array().expect("No members in response");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["email"], "a@x.com");

    let body = send(&app, "POST", "/search_members", Some(json!({ "query": "x.com" }))).await;
    assert_eq!(body["members"].as_array().map(Vec::len), Some(1));

    let body = send(&app, "POST", "/search_members", Some(json!({ "query": "bob" }))).await;
    assert_eq!(body, json!({ "message": "No members found matching the query" }));

    let body = send(&app, "POST", "/search_members", Some(json!({ "query": "" }))).await;
    assert_eq!(body["error"], "Please provide a search query");
}

#[tokio::test]
async fn test_search_non_ascii() {
    let app = test_app().await;
    send(
        &app,
        "POST",
        "/add_book",
        Some(json!({
            "title": "Émile",
            "author": "Rousseau",
            "year_of_publication": 1762,
            "book_count": 1
        })),
    )
    .await;
    send(
        &app,
        "POST",
        "/add_member",
        Some(json!({ "name": "Ärne", "email": "arne@x.com" })),
    )
    .await;

    let body = send(&app, "POST", "/search_books", Some(json!({ "query": "Émile" }))).await;
    let books = body["books"].as_array().expect("No books in response");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Émile");

    // ASCII part still folds case
    let body = send(&app, "POST", "/search_books", Some(json!({ "query": "ÉMILE" }))).await;
    assert_eq!(body["books"].as_array().map(Vec::len), Some(1));

    let body = send(&app, "POST", "/search_members", Some(json!({ "query": "Ärne" }))).await;
    let members = body["members"].as_array().expect("No members in response");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["email"], "arne@x.com");
}

#[tokio::test]
async fn test_rename_book_onto_existing_is_duplicate() {
    let app = test_app().await;
    send(&app, "POST", "/add_book", Some(dune())).await;
    send(
        &app,
        "POST",
        "/add_book",
        Some(json!({
            "title": "Children of Dune",
            "author": "Herbert",
            "year_of_publication": 1976,
            "book_count": 2
        })),
    )
    .await;
    let before = send(&app, "GET", "/get_books", None).await;
    let id = before[1]["id"].as_i64().expect("No book ID");

    let body = send(
        &app,
        "PUT",
        &format!("/update_book/{}", id),
        Some(json!({ "title": "Dune", "book_count": 5 })),
    )
    .await;
    assert_eq!(body["error"], "Book with the same title and author already exists");
    assert_eq!(body["code"], 8);

    let after = send(&app, "GET", "/get_books", None).await;
    assert_eq!(before, after);
}
