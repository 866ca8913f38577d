//! Router-level tests for the product and admin APIs.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;

mod common;
use common::{authed, json_request, login, send, test_app, ADMIN_PASSWORD, ADMIN_USER};

fn widget() -> serde_json::Value {
    json!({
        "name": "  Widget  ",
        "category": "Tools",
        "description": "A widget",
        "specs": ["fast", null, "small"],
        "features": [],
        "price": "₩12,000",
        "image": "javascript:alert(1)",
        "downloadUrl": "https://example.com/widget.zip"
    })
}

#[tokio::test]
async fn test_listing_is_public() {
    let app = common::test_app();
    let (status, _, body) = send(
        &app,
        Request::builder().uri("/api/products").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_seeded_listing_is_ordered() {
    let app = showcase::build_router(common::test_state(true));
    let (status, _, body) = send(
        &app,
        Request::builder().uri("/api/products").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert!(!ids.is_empty());
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_mutations_require_session() {
    let app = test_app();
    let cases = [
        json_request("POST", "/api/products", &widget()),
        json_request("PUT", "/api/products/1", &widget()),
        Request::builder()
            .method("DELETE")
            .uri("/api/products/1")
            .body(Body::empty())
            .unwrap(),
        authed("POST", "/api/products", "not-a-real-token", Some(&widget())),
    ];
    for request in cases {
        let (status, _, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_create_update_delete_flow() {
    let app = test_app();
    let token = login(&app).await;

    let mut payload = widget();
    payload["id"] = json!(999);
    let (status, _, created) = send(&app, authed("POST", "/api/products", &token, Some(&payload))).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();
    assert_ne!(id, 999);
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["specs"], json!(["fast", "small"]));
    assert_eq!(created["price"], "12000");
    assert_eq!(created["image"], "");
    assert_eq!(created["downloadUrl"], "https://example.com/widget.zip");
    assert!(created["createdAt"].is_string());

    let mut changed = widget();
    changed["name"] = json!("Gadget");
    let (status, _, updated) = send(
        &app,
        authed("PUT", &format!("/api/products/{id}"), &token, Some(&changed)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Gadget");

    let (_, _, listed) = send(
        &app,
        Request::builder().uri("/api/products").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "Gadget");

    let (status, _, body) = send(&app, authed("DELETE", &format!("/api/products/{id}"), &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _, body) = send(&app, authed("DELETE", &format!("/api/products/{id}"), &token, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_bad_ids_and_payloads() {
    let app = test_app();
    let token = login(&app).await;

    for uri in ["/api/products/abc", "/api/products/0", "/api/products/-3"] {
        let (status, _, body) = send(&app, authed("PUT", uri, &token, Some(&widget()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Invalid product id");
    }

    let (status, _, _) = send(&app, authed("DELETE", "/api/products/abc", &token, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(
        &app,
        authed("POST", "/api/products", &token, Some(&json!({ "name": "x", "category": "y" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid product data");

    let garbage = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, _) = send(&app, garbage).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_of_missing_product_is_404() {
    let app = test_app();
    let token = login(&app).await;
    let (status, _, body) = send(&app, authed("PUT", "/api/products/42", &token, Some(&widget()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_login_sets_cookie() {
    let app = test_app();
    let (status, headers, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/login",
            &json!({ "username": format!("  {ADMIN_USER} "), "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["sessionId"].as_str().unwrap();
    assert_eq!(token.len(), 43);

    let cookie = headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("admin_session={token};")));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app();
    let cases = [
        json_request("POST", "/api/admin/login", &json!({ "username": ADMIN_USER, "password": "nope" })),
        json_request("POST", "/api/admin/login", &json!({ "username": "root", "password": ADMIN_PASSWORD })),
        Request::builder()
            .method("POST")
            .uri("/api/admin/login")
            .body(Body::from("garbage"))
            .unwrap(),
    ];
    for request in cases {
        let (status, headers, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
        assert!(headers.get(header::SET_COOKIE).is_none());
    }
}

#[tokio::test]
async fn test_sixth_login_attempt_is_rate_limited() {
    let app = test_app();
    let wrong = json!({ "username": ADMIN_USER, "password": "wrong" });
    for _ in 0..5 {
        let (status, _, _) = send(&app, json_request("POST", "/api/admin/login", &wrong)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let right = json!({ "username": ADMIN_USER, "password": ADMIN_PASSWORD });
    let (status, _, body) = send(&app, json_request("POST", "/api/admin/login", &right)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many attempts. Try again later.");

    let mut other_client = json_request("POST", "/api/admin/login", &right);
    other_client
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.50".parse().unwrap());
    let (status, _, _) = send(&app, other_client).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_cookie_authenticates_and_logout_revokes() {
    let app = test_app();
    let token = login(&app).await;

    let with_cookie = |method: &str, uri: &str| {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("theme=dark; admin_session={token}"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, _, _) = send(&app, with_cookie("DELETE", "/api/products/7")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, headers, body) = send(&app, with_cookie("POST", "/api/admin/logout")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert!(headers[header::SET_COOKIE].to_str().unwrap().contains("Max-Age=0"));

    let (status, _, _) = send(&app, with_cookie("DELETE", "/api/products/7")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_every_response_is_hardened() {
    let app = test_app();
    let requests = [
        Request::builder().uri("/api/products").body(Body::empty()).unwrap(),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
        Request::builder().uri("/nowhere").body(Body::empty()).unwrap(),
        json_request("POST", "/api/products", &widget()),
    ];
    for request in requests {
        let (_, headers, _) = send(&app, request).await;
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
        assert!(headers.contains_key("content-security-policy"));
        assert!(headers.contains_key("x-request-id"));
    }
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let app = test_app();
    let (status, _, body) = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, _, _) = send(
        &app,
        Request::builder().uri("/nowhere").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = test_app();
    let token = login(&app).await;
    let mut payload = widget();
    payload["description"] = json!("x".repeat(3 * 1024 * 1024));
    let body = payload.to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
