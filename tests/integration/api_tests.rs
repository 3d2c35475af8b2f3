//! API integration tests

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

use bookshelf_server::{
    api,
    repository::{books::BookStore, Repository},
    services::Services,
    AppState,
};

/// Start a server over a freshly seeded store and return its base URL
async fn spawn_server() -> String {
    let state = AppState {
        services: Arc::new(Services::new(Repository::new(BookStore::seeded()))),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

async fn list_books(client: &Client, base: &str) -> HashMap<String, Value> {
    client
        .get(format!("{}/books", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_server().await;

    let response = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 3);
}

#[tokio::test]
async fn test_health_tracks_catalog_size() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .delete(format!("{}/books/3", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["books"], 2);
}

#[tokio::test]
async fn test_root_redirects_to_docs() {
    let base = spawn_server().await;
    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client");

    let response = client
        .get(format!("{}/", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/docs");
}

#[tokio::test]
async fn test_list_seeded_books() {
    let base = spawn_server().await;
    let client = Client::new();

    let books = list_books(&client, &base).await;

    assert_eq!(books.len(), 3);
    assert_eq!(books["1"]["name"], "Marina");
    assert_eq!(books["2"]["author"], "William Gibson");
    assert_eq!(books["3"]["date"], "1887");
}

#[tokio::test]
async fn test_create_book() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .query(&[("name", "Dune"), ("author", "Frank Herbert"), ("date", "1965")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], 4);
    assert_eq!(body["name"], "Dune");

    let books = list_books(&client, &base).await;
    assert_eq!(books["4"]["author"], "Frank Herbert");
    assert_eq!(books["4"]["date"], "1965");
}

#[tokio::test]
async fn test_create_duplicate_name_conflicts() {
    let base = spawn_server().await;

    let response = Client::new()
        .post(format!("{}/books", base))
        .query(&[("name", "NEUROMANCER"), ("author", "Someone"), ("date", "2000")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Duplicate");
    assert!(body["message"].as_str().unwrap().contains("NEUROMANCER"));
}

#[tokio::test]
async fn test_create_missing_parameter_is_bad_request() {
    let base = spawn_server().await;

    let response = Client::new()
        .post(format!("{}/books", base))
        .query(&[("name", "Dune"), ("author", "Frank Herbert")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_book() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/books/2", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Neuromancer");

    let response = client
        .get(format!("{}/books/99", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_update() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/books/1", base))
        .query(&[("author", "New Author"), ("date", "")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let message: String = response.json().await.expect("Failed to parse response");
    assert!(message.contains('1'));

    let books = list_books(&client, &base).await;
    assert_eq!(books["1"]["name"], "Marina");
    assert_eq!(books["1"]["author"], "New Author");
    assert_eq!(books["1"]["date"], "1999");
}

#[tokio::test]
async fn test_update_missing_book_not_found() {
    let base = spawn_server().await;

    let response = Client::new()
        .put(format!("{}/books/99", base))
        .query(&[("name", "Ghost")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("99"));
}

#[tokio::test]
async fn test_delete_book() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .delete(format!("{}/books/2", base))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.expect("Failed to read body").is_empty());

    let books = list_books(&client, &base).await;
    assert!(!books.contains_key("2"));

    let response = client
        .delete(format!("{}/books/2", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let base = spawn_server().await;

    let response = Client::new()
        .delete(format!("{}/books/abc", base))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_openapi_document_lists_book_routes() {
    let base = spawn_server().await;

    let response = Client::new()
        .get(format!("{}/openapi.json", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/books/{book_id}"].is_object());
}
