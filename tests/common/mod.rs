//! Shared utilities for the integration suites.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use showcase::config::ShowcaseConfig;
use showcase::http::{build_router, AppState};
use showcase::store::ProductStore;
use tower::ServiceExt;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";

/// Config with fixed credentials and nothing touching the filesystem.
pub fn test_config() -> ShowcaseConfig {
    let mut config = ShowcaseConfig::default();
    config.admin.username = ADMIN_USER.to_string();
    config.admin.password = ADMIN_PASSWORD.to_string();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

/// State over an in-memory store, seeded or empty.
pub fn test_state(seed: bool) -> AppState {
    let store = ProductStore::open_in_memory(seed).unwrap();
    AppState::new(test_config(), store)
}

pub fn test_app() -> Router {
    build_router(test_state(false))
}

/// Send one request; returns status, headers and the body as JSON
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, json)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed(method: &str, uri: &str, token: &str, body: Option<&Value>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap()
}

/// Log in with the fixed credentials and return the session token.
pub async fn login(app: &Router) -> String {
    let (status, _, body) = send(
        app,
        json_request(
            "POST",
            "/api/admin/login",
            &serde_json::json!({ "username": ADMIN_USER, "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["sessionId"].as_str().unwrap().to_string()
}
