//! Common test utilities

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use slooze_inventory::{build_router, AppState};

pub const MANAGER: (&str, &str) = ("manager@slooze.com", "manager123");
pub const KEEPER: (&str, &str) = ("keeper@slooze.com", "keeper123");

/// Router over the seeded in-memory catalog and demo accounts
pub fn test_app() -> Router {
    build_router(AppState::in_memory())
}

/// Send one request and decode the JSON body (`Value::Null` when empty)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

/// Log in and return the access token
pub async fn login(app: &Router, (email, password): (&str, &str)) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["accessToken"].as_str().unwrap().to_string()
}
