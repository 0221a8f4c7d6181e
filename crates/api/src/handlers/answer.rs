//! Handlers for answers: creation under a question, listing, editing,
//! accepting, and deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quorum_core::error::CoreError;
use quorum_core::types::DbId;
use quorum_db::models::answer::{Answer, CreateAnswer};
use quorum_db::repositories::{AnswerRepo, QuestionRepo, UserRepo};
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

/// Request body for `POST /questions/{id}/answers` and `PATCH /answers/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct AnswerBodyRequest {
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/questions/{id}/answers
///
/// Answer a question. Closed questions reject new answers. The question
/// author is notified, and @mentions in the body fan out.
pub async fn create_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    Json(input): Json<AnswerBodyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Answer>>)> {
    input.validate()?;

    let question = QuestionRepo::find_by_id(&state.pool, question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }))?;

    if question.is_closed {
        return Err(AppError::Core(CoreError::InvalidOperation(
            "This question is closed to new answers".into(),
        )));
    }

    let author = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let answer = AnswerRepo::create(
        &state.pool,
        &CreateAnswer {
            question_id,
            author_id: author.id,
            author_username: author.username.clone(),
            body: input.body,
        },
    )
    .await?;

    notifications::answer_posted(&state.pool, &question, author.id, &author.username).await?;
    notifications::mentions_posted(
        &state.pool,
        &answer.body,
        author.id,
        &author.username,
        "answer",
        &question.title,
        &[question.author_id],
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: answer })))
}

/// GET /api/v1/questions/{id}/answers
///
/// A question's answers: accepted first, then by votes, then newest.
pub async fn list_answers(
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Answer>>>> {
    if QuestionRepo::find_by_id(&state.pool, question_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }));
    }

    let answers = AnswerRepo::list_for_question(&state.pool, question_id).await?;
    Ok(Json(DataResponse { data: answers }))
}

/// GET /api/v1/answers/{id}
pub async fn get_answer(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Answer>>> {
    let answer = AnswerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id,
        }))?;
    Ok(Json(DataResponse { data: answer }))
}

/// PATCH /api/v1/answers/{id}
///
/// Author-only body edit.
pub async fn update_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AnswerBodyRequest>,
) -> AppResult<Json<DataResponse<Answer>>> {
    input.validate()?;

    let existing = AnswerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id,
        }))?;
    ensure_author(&auth, existing.author_id)?;

    let updated = AnswerRepo::update_body(&state.pool, id, &input.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/answers/{id}/accept
///
/// Only the question's author can accept an answer. Any previously accepted
/// answer on the question is cleared in the same transaction.
pub async fn accept_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Answer>>> {
    let answer = AnswerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id,
        }))?;

    let question = QuestionRepo::find_by_id(&state.pool, answer.question_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: answer.question_id,
        }))?;

    if auth.user_id != question.author_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the question author can accept an answer".into(),
        )));
    }

    let accepted = AnswerRepo::accept(&state.pool, id, question.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id,
        }))?;

    Ok(Json(DataResponse { data: accepted }))
}

/// DELETE /api/v1/answers/{id}
///
/// Author or admin. Comments and ledger rows go with it.
pub async fn delete_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = AnswerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Answer",
            id,
        }))?;
    ensure_author_or_admin(&auth, existing.author_id)?;

    AnswerRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
