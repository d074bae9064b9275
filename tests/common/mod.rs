#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use classroom::router::init_router;
use classroom::state::AppState;
use classroom_db::memory::MemoryStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const KEN: &str = "teacherken@gmail.com";
pub const JOE: &str = "teacherjoe@gmail.com";

/// Router over a fresh in-memory store. The store handle shares its data
/// with the app, so tests can seed it and inspect it afterwards.
pub fn setup_test_app() -> (axum::Router, MemoryStore) {
    let store = MemoryStore::new();
    let app = init_router(AppState::new(store.repositories()));
    (app, store)
}

pub async fn post_json(app: axum::Router, uri: &str, body: Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(
    app: axum::Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(body.into())
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: axum::Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Asserts a 422 response carrying `message`.
pub async fn assert_error(response: Response<Body>, message: &str) {
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    let body = body_json(response).await;
    assert_eq!(body["code"], 422);
    assert_eq!(body["message"], message);
}
