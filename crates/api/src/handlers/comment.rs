//! Handlers for comments on answers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quorum_core::error::CoreError;
use quorum_core::types::DbId;
use quorum_db::models::comment::{Comment, CreateComment};
use quorum_db::repositories::{AnswerRepo, CommentRepo, QuestionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_author_or_admin;
use crate::middleware::auth::AuthUser;
use crate::notifications;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /answers/{id}/comments`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
}

/// POST /api/v1/answers/{id}/comments
///
/// Comment on an answer. The answer author is notified, and @mentions in
/// the body fan out.
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(answer_id): Path<DbId>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    input.validate()?;

    let answer = AnswerRepo::find_by_id(&state.pool, answer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }))?;

    let author = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            answer_id,
            author_id: author.id,
            author_username: author.username.clone(),
            body: input.body,
        },
    )
    .await?;

    // The question title gives the notification its context; fall back if
    // the question vanished mid-request.
    let question_title = QuestionRepo::find_by_id(&state.pool, answer.question_id)
        .await?
        .map(|q| q.title)
        .unwrap_or_else(|| "your answer".to_string());

    notifications::comment_posted(
        &state.pool,
        &answer,
        &question_title,
        author.id,
        &author.username,
    )
    .await?;
    notifications::mentions_posted(
        &state.pool,
        &comment.body,
        author.id,
        &author.username,
        "comment",
        &question_title,
        &[answer.author_id],
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/answers/{id}/comments
///
/// An answer's comments, oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(answer_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    if AnswerRepo::find_by_id(&state.pool, answer_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id: answer_id,
        }));
    }

    let comments = CommentRepo::list_for_answer(&state.pool, answer_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// DELETE /api/v1/comments/{id}
///
/// Author or admin.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;
    ensure_author_or_admin(&auth, existing.author_id)?;

    CommentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
