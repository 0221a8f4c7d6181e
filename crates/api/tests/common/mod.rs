//! Shared harness for API integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) on top
//! of the per-test database provided by `#[sqlx::test]`, plus small HTTP
//! helpers over `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use quorum_api::auth::jwt::JwtConfig;
use quorum_api::config::ServerConfig;
use quorum_api::router::build_app_router;
use quorum_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    request(app, "GET", uri, None, None).await
}

/// Send a GET request with a Bearer token.
pub async fn get_authed(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, "GET", uri, None, Some(token)).await
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request(app, "POST", uri, Some(body), None).await
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_authed(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    request(app, "POST", uri, Some(body), Some(token)).await
}

/// Send a POST request with a Bearer token and no body.
pub async fn post_authed(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, "POST", uri, None, Some(token)).await
}

/// Send a PATCH request with a JSON body and a Bearer token.
pub async fn patch_json_authed(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    request(app, "PATCH", uri, Some(body), Some(token)).await
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_authed(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, "DELETE", uri, None, Some(token)).await
}

async fn request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Sign up a user and log them in, returning the access token.
pub async fn signup_and_login(app: &Router, username: &str) -> String {
    let signup = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        serde_json::json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "a-strong-password",
        }),
    )
    .await;
    assert_eq!(signup.status(), StatusCode::CREATED, "signup should succeed");

    login(app, username).await
}

/// Log an existing user in, returning the access token.
pub async fn login(app: &Router, username: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({
            "username": username,
            "password": "a-strong-password",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");

    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

/// Promote a user to the admin role directly in the database.
pub async fn promote_to_admin(pool: &PgPool, username: &str) {
    sqlx::query(
        "UPDATE users SET role_id = (SELECT id FROM roles WHERE name = 'admin')
         WHERE username = $1",
    )
    .bind(username)
    .execute(pool)
    .await
    .unwrap();
}

/// Create a question through the API, returning its id.
pub async fn create_question(app: &Router, token: &str, title: &str) -> i64 {
    let response = post_json_authed(
        app.clone(),
        "/api/v1/questions",
        serde_json::json!({
            "title": title,
            "description": format!("Description for {title}"),
            "tags": "rust,testing",
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

/// Shift a question's creation timestamp back by `hours` (for trending
/// window tests; the API never exposes created_at mutation).
pub async fn age_question(pool: &PgPool, question_id: i64, hours: i64) {
    sqlx::query(&format!(
        "UPDATE questions SET created_at = NOW() - INTERVAL '{hours} hours' WHERE id = $1"
    ))
    .bind(question_id)
    .execute(pool)
    .await
    .unwrap();
}
