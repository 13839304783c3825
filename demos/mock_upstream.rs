//! A stand-in for the upstream API, serving DummyJSON-shaped posts, todos and users.
//!
//! ```text
//! cargo run --example mock_upstream
//! API_URL=http://127.0.0.1:8081 cargo run
//! cargo run --bin bff-cli -- todos list
//! ```

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;

fn posts() -> Value {
    json!([
        { "id": 1, "userId": 121, "title": "His mother had always taught him", "body": "His mother had always taught him not to ever think of himself as better than others." },
        { "id": 2, "userId": 91, "title": "He was an expert but not in a discipline", "body": "He was an expert but not in a discipline that anyone could fully appreciate." }
    ])
}

fn todos() -> Value {
    json!([
        { "id": 1, "todo": "Do something nice for someone you care about", "completed": false, "userId": 152 },
        { "id": 2, "todo": "Memorize a poem", "completed": true, "userId": 13 }
    ])
}

fn users() -> Value {
    json!([
        { "id": 1, "firstName": "Emily", "lastName": "Johnson", "email": "emily.johnson@x.dummyjson.com", "phone": "+81 965-431-3024", "username": "emilys", "age": 28 },
        { "id": 2, "firstName": "Michael", "lastName": "Williams", "email": "michael.williams@x.dummyjson.com", "phone": "+49 258-627-6644", "username": "michaelw", "age": 35 }
    ])
}

fn find(items: Value, id: u64, kind: &str) -> impl IntoResponse {
    let found = items
        .as_array()
        .and_then(|list| list.iter().find(|item| item["id"] == id).cloned());
    match found {
        Some(item) => (StatusCode::OK, Json(item)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("{} with id '{}' not found", kind, id) })),
        ),
    }
}

fn created(id: u64, mut body: Value) -> impl IntoResponse {
    body["id"] = json!(id);
    (StatusCode::CREATED, Json(body))
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/posts", get(|| async { Json(json!({ "posts": posts(), "total": 2, "skip": 0, "limit": 30 })) }))
        .route("/posts/add", post(|Json(body): Json<Value>| async move { created(252, body) }))
        .route("/posts/{id}", get(|Path(id): Path<u64>| async move { find(posts(), id, "Post") }))
        .route("/todos", get(|| async { Json(json!({ "todos": todos(), "total": 2, "skip": 0, "limit": 30 })) }))
        .route("/todos/add", post(|Json(body): Json<Value>| async move { created(255, body) }))
        .route(
            "/todos/{id}",
            get(|Path(id): Path<u64>| async move { find(todos(), id, "Todo") }).delete(
                |Path(id): Path<u64>| async move {
                    let mut todo = todos()
                        .as_array()
                        .and_then(|list| list.iter().find(|t| t["id"] == id).cloned())
                        .unwrap_or_else(|| json!({ "id": id, "todo": "", "completed": false, "userId": 0 }));
                    todo["isDeleted"] = json!(true);
                    Json(todo)
                },
            ),
        )
        .route("/users", get(|| async { Json(json!({ "users": users(), "total": 2, "skip": 0, "limit": 30 })) }))
        .route("/users/add", post(|Json(body): Json<Value>| async move { created(209, body) }))
        .route("/users/{id}", get(|Path(id): Path<u64>| async move { find(users(), id, "User") }));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock upstream listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
