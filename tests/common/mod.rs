#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use cvmaker_backend::{
    config::{Config, LogFormat},
    routes::build_router,
    services::{cv_store::MemoryCvStore, user_store::MemoryUserStore},
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub fn test_config(auth_rps: u32) -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: None,
        jwt_secret: "test_secret_key".into(),
        jwt_ttl_hours: 1,
        auth_rps,
        frontend_origin: None,
        log_format: LogFormat::Text,
    }
}

pub fn app_with_rps(auth_rps: u32) -> Router {
    let config = test_config(auth_rps);
    let state = AppState::new(
        &config,
        Arc::new(MemoryCvStore::new()),
        Arc::new(MemoryUserStore::new()),
    );
    build_router(state, &config)
}

pub fn app() -> Router {
    app_with_rps(1000)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

/// Registers a fresh account and returns its bearer token.
pub async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "s3cret-pass",
            "firstName": "Ada",
            "lastName": "Lovelace"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

pub fn valid_cv(first_name: &str) -> JsonValue {
    json!({
        "firstName": first_name,
        "lastName": "Doe",
        "age": 30,
        "phoneNumber": "1234567890",
        "address": "1 Main Street, Springfield",
        "coordinates": { "lat": 39.78, "lng": -89.65 },
        "dateOfBirth": "1995-01-01",
        "isActive": true,
        "nationality": "American",
        "employmentStatus": "Employed",
        "preferredLanguages": ["English", "Spanish"],
        "workExperience": [{
            "id": "6f1c1b8e-4a8e-4d5e-9a39-0b9f6c1d2e3f",
            "company": "Acme",
            "position": "Engineer",
            "startDate": "2020-01",
            "endDate": "2021-01",
            "description": "",
            "isCurrent": false
        }],
        "termsAccepted": true
    })
}
