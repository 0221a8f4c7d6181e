//! Handlers for the `/questions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quorum_core::error::CoreError;
use quorum_core::types::DbId;
use quorum_db::models::question::{CreateQuestion, Question, UpdateQuestion};
use quorum_db::repositories::{QuestionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_author, ensure_author_or_admin};
use crate::middleware::auth::AuthUser;
use crate::notifications;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /questions`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub tags: Option<String>,
}

/// Request body for `PATCH /questions/{id}`. All fields optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub tags: Option<String>,
    pub is_closed: Option<bool>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/questions
///
/// Create a question. The author's username is snapshotted onto the row at
/// creation time.
pub async fn create_question(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuestionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Question>>)> {
    input.validate()?;

    let author = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let question = QuestionRepo::create(
        &state.pool,
        &CreateQuestion {
            author_id: author.id,
            author_username: author.username.clone(),
            title: input.title,
            description: input.description,
            tags: input.tags,
        },
    )
    .await?;

    notifications::mentions_posted(
        &state.pool,
        &question.description,
        author.id,
        &author.username,
        "question",
        &question.title,
        &[],
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// GET /api/v1/questions/{id}
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Question>>> {
    let question = QuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id,
        }))?;
    Ok(Json(DataResponse { data: question }))
}

/// PATCH /api/v1/questions/{id}
///
/// Author-only edit of title/description/tags, and closing/reopening.
pub async fn update_question(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuestionRequest>,
) -> AppResult<Json<DataResponse<Question>>> {
    input.validate()?;

    let existing = QuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id,
        }))?;
    ensure_author(&auth, existing.author_id)?;

    let updated = QuestionRepo::update(
        &state.pool,
        id,
        &UpdateQuestion {
            title: input.title,
            description: input.description,
            tags: input.tags,
            is_closed: input.is_closed,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Question",
        id,
    }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/questions/{id}
///
/// Author or admin. Answers, comments, and ledger rows go with it.
pub async fn delete_question(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = QuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id,
        }))?;
    ensure_author_or_admin(&auth, existing.author_id)?;

    QuestionRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
