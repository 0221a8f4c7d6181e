//! Integration tests for the vote ledger endpoints: idempotent casts,
//! polarity flips, retraction, self-vote rejection, and stats.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, create_question, delete_authed, get, get_authed, post_json_authed,
    signup_and_login,
};
use sqlx::PgPool;

async fn cast(app: &Router, token: &str, question_id: i64, is_upvote: bool) -> serde_json::Value {
    let response = post_json_authed(
        app.clone(),
        &format!("/api/v1/questions/{question_id}/vote"),
        serde_json::json!({ "is_upvote": is_upvote }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_cast_is_accepted_and_counted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup_and_login(&app, "author").await;
    let voter = signup_and_login(&app, "voter").await;
    let question = create_question(&app, &author, "Votable").await;

    let json = cast(&app, &voter, question, true).await;
    assert_eq!(json["data"]["outcome"], "accepted");
    assert_eq!(json["data"]["vote_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_same_polarity_is_noop(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup_and_login(&app, "author").await;
    let voter = signup_and_login(&app, "voter").await;
    let question = create_question(&app, &author, "Votable").await;

    cast(&app, &voter, question, true).await;
    let json = cast(&app, &voter, question, true).await;

    assert_eq!(json["data"]["outcome"], "noop");
    assert_eq!(json["data"]["vote_count"], 1, "count is unchanged");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn flip_moves_count_by_two(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup_and_login(&app, "author").await;
    let voter = signup_and_login(&app, "voter").await;
    let question = create_question(&app, &author, "Votable").await;

    let json = cast(&app, &voter, question, true).await;
    assert_eq!(json["data"]["vote_count"], 1);

    let json = cast(&app, &voter, question, false).await;
    assert_eq!(json["data"]["outcome"], "accepted");
    assert_eq!(json["data"]["vote_count"], -1, "flip is +/-2, never +/-1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn self_vote_is_rejected_without_mutation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup_and_login(&app, "author").await;
    let question = create_question(&app, &author, "My own question").await;

    let response = post_json_authed(
        app.clone(),
        &format!("/api/v1/questions/{question}/vote"),
        serde_json::json!({ "is_upvote": true }),
        &author,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_OPERATION");

    // Neither the ledger nor the count moved.
    let stats = body_json(get(app.clone(), &format!("/api/v1/questions/{question}/votes")).await).await;
    assert_eq!(stats["data"]["total_votes"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retract_restores_the_count(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup_and_login(&app, "author").await;
    let voter = signup_and_login(&app, "voter").await;
    let question = create_question(&app, &author, "Votable").await;

    cast(&app, &voter, question, false).await;

    let response = delete_authed(
        app.clone(),
        &format!("/api/v1/questions/{question}/vote"),
        &voter,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["outcome"], "removed");
    assert_eq!(json["data"]["vote_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retracting_a_nonexistent_vote_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup_and_login(&app, "author").await;
    let voter = signup_and_login(&app, "voter").await;
    let question = create_question(&app, &author, "Votable").await;

    let response = delete_authed(
        app.clone(),
        &format!("/api/v1/questions/{question}/vote"),
        &voter,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let stats = body_json(get(app.clone(), &format!("/api/v1/questions/{question}/votes")).await).await;
    assert_eq!(stats["data"]["total_votes"], 0, "count is untouched");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn voting_on_a_missing_target_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let voter = signup_and_login(&app, "voter").await;

    let response = post_json_authed(
        app.clone(),
        "/api/v1/questions/999999/vote",
        serde_json::json!({ "is_upvote": true }),
        &voter,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn distinct_voters_accumulate_independently(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup_and_login(&app, "author").await;
    let question = create_question(&app, &author, "Votable").await;

    let up = signup_and_login(&app, "up_voter").await;
    let down = signup_and_login(&app, "down_voter").await;
    let up2 = signup_and_login(&app, "up_voter2").await;

    cast(&app, &up, question, true).await;
    cast(&app, &down, question, false).await;
    let json = cast(&app, &up2, question, true).await;

    assert_eq!(json["data"]["vote_count"], 1, "1 up - 1 down + 1 up");

    let stats = body_json(get(app.clone(), &format!("/api/v1/questions/{question}/votes")).await).await;
    assert_eq!(stats["data"]["total_votes"], 3);
    assert_eq!(stats["data"]["upvotes"], 2);
    assert_eq!(stats["data"]["downvotes"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_include_viewer_polarity_when_authenticated(pool: PgPool) {
    let app = common::build_test_app(pool);
    let author = signup_and_login(&app, "author").await;
    let voter = signup_and_login(&app, "voter").await;
    let question = create_question(&app, &author, "Votable").await;

    cast(&app, &voter, question, false).await;

    let authed = body_json(
        get_authed(
            app.clone(),
            &format!("/api/v1/questions/{question}/votes"),
            &voter,
        )
        .await,
    )
    .await;
    assert_eq!(authed["data"]["viewer_vote"], false);

    let anonymous =
        body_json(get(app.clone(), &format!("/api/v1/questions/{question}/votes")).await).await;
    assert!(anonymous["data"]["viewer_vote"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn answers_have_their_own_ledger(pool: PgPool) {
    let app = common::build_test_app(pool);
    let asker = signup_and_login(&app, "asker").await;
    let answerer = signup_and_login(&app, "answerer").await;
    let question = create_question(&app, &asker, "Q").await;

    let response = post_json_authed(
        app.clone(),
        &format!("/api/v1/questions/{question}/answers"),
        serde_json::json!({ "body": "An answer" }),
        &answerer,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let answer_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // The asker can vote on the answer (not their own content).
    let response = post_json_authed(
        app.clone(),
        &format!("/api/v1/answers/{answer_id}/vote"),
        serde_json::json!({ "is_upvote": true }),
        &asker,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["vote_count"], 1);

    // The answerer cannot vote on their own answer.
    let response = post_json_authed(
        app.clone(),
        &format!("/api/v1/answers/{answer_id}/vote"),
        serde_json::json!({ "is_upvote": true }),
        &answerer,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
