//! Integration tests for user profiles and admin account management.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_authed, get, get_authed, login, post_json, signup_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn public_profile_hides_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let _token = signup_and_login(&app, "alice").await;

    let response = get(app.clone(), "/api/v1/users/alice").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "alice");
    assert!(json["data"].get("email").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_profile_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/users/nobody").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_users_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = signup_and_login(&app, "alice").await;

    let response = get_authed(app.clone(), "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    common::promote_to_admin(&pool, "alice").await;
    let token = login(&app, "alice").await;

    let response = get_authed(app.clone(), "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"][0]["username"], "alice");
    assert_eq!(json["data"][0]["role"], "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_users_cannot_log_in_and_vanish_from_profiles(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let _victim = signup_and_login(&app, "victim").await;
    let _admin = signup_and_login(&app, "admin_user").await;
    common::promote_to_admin(&pool, "admin_user").await;
    let admin = login(&app, "admin_user").await;

    let response = delete_authed(app.clone(), "/api/v1/users/victim", &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Profile is hidden.
    let response = get(app.clone(), "/api/v1/users/victim").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Login is refused.
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        serde_json::json!({ "username": "victim", "password": "a-strong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivation_keeps_content_and_snapshots(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let victim = signup_and_login(&app, "victim").await;
    let question = common::create_question(&app, &victim, "Outliving my account").await;

    let _admin = signup_and_login(&app, "admin_user").await;
    common::promote_to_admin(&pool, "admin_user").await;
    let admin = login(&app, "admin_user").await;
    let response = delete_authed(app.clone(), "/api/v1/users/victim", &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The question still lists with the stale username snapshot.
    let json = body_json(get(app.clone(), &format!("/api/v1/questions/{question}")).await).await;
    assert_eq!(json["data"]["author_username"], "victim");
}
