//! Handlers for the vote ledger: cast, retract, and stats, for both
//! questions and answers.
//!
//! Target resolution and the self-vote check happen here, before the
//! transactional ledger mutation in `VoteRepo`.

use axum::extract::{Path, State};
use axum::Json;
use quorum_core::error::CoreError;
use quorum_core::types::DbId;
use quorum_core::voting::{ensure_not_self_vote, VoteTarget};
use quorum_db::models::vote::{CastOutcome, RetractOutcome, VoteStats};
use quorum_db::repositories::{AnswerRepo, QuestionRepo, VoteRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /questions/{id}/vote` and `POST /answers/{id}/vote`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub is_upvote: bool,
}

/// Response body echoing the resulting count and what happened.
#[derive(Debug, Serialize)]
pub struct VoteCountResponse {
    pub vote_count: i64,
    /// `"accepted"` (created or flipped), `"noop"` (same polarity repeated),
    /// or `"removed"` (retraction).
    pub outcome: &'static str,
}

// ---------------------------------------------------------------------------
// Question votes
// ---------------------------------------------------------------------------

/// POST /api/v1/questions/{id}/vote
pub async fn vote_question(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<Json<DataResponse<VoteCountResponse>>> {
    cast(&state, &auth, VoteTarget::Question, id, input.is_upvote).await
}

/// DELETE /api/v1/questions/{id}/vote
pub async fn unvote_question(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteCountResponse>>> {
    retract(&state, &auth, VoteTarget::Question, id).await
}

/// GET /api/v1/questions/{id}/votes
pub async fn question_vote_stats(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteStats>>> {
    stats(&state, viewer, VoteTarget::Question, id).await
}

// ---------------------------------------------------------------------------
// Answer votes
// ---------------------------------------------------------------------------

/// POST /api/v1/answers/{id}/vote
pub async fn vote_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<Json<DataResponse<VoteCountResponse>>> {
    cast(&state, &auth, VoteTarget::Answer, id, input.is_upvote).await
}

/// DELETE /api/v1/answers/{id}/vote
pub async fn unvote_answer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteCountResponse>>> {
    retract(&state, &auth, VoteTarget::Answer, id).await
}

/// GET /api/v1/answers/{id}/votes
pub async fn answer_vote_stats(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteStats>>> {
    stats(&state, viewer, VoteTarget::Answer, id).await
}

// ---------------------------------------------------------------------------
// Shared logic
// ---------------------------------------------------------------------------

/// Resolve a target's author, or 404.
async fn resolve_author(state: &AppState, target: VoteTarget, id: DbId) -> AppResult<DbId> {
    let author_id = match target {
        VoteTarget::Question => QuestionRepo::find_by_id(&state.pool, id)
            .await?
            .map(|q| q.author_id),
        VoteTarget::Answer => AnswerRepo::find_by_id(&state.pool, id)
            .await?
            .map(|a| a.author_id),
    };
    author_id.ok_or(AppError::Core(CoreError::NotFound {
        entity: target.entity(),
        id,
    }))
}

async fn cast(
    state: &AppState,
    auth: &AuthUser,
    target: VoteTarget,
    id: DbId,
    is_upvote: bool,
) -> AppResult<Json<DataResponse<VoteCountResponse>>> {
    let author_id = resolve_author(state, target, id).await?;
    ensure_not_self_vote(auth.user_id, author_id)?;

    let outcome = VoteRepo::cast(&state.pool, auth.user_id, target, id, is_upvote).await?;
    let response = match outcome {
        CastOutcome::Accepted { vote_count } => VoteCountResponse {
            vote_count,
            outcome: "accepted",
        },
        CastOutcome::Noop { vote_count } => VoteCountResponse {
            vote_count,
            outcome: "noop",
        },
        CastOutcome::TargetMissing => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: target.entity(),
                id,
            }));
        }
    };

    Ok(Json(DataResponse { data: response }))
}

async fn retract(
    state: &AppState,
    auth: &AuthUser,
    target: VoteTarget,
    id: DbId,
) -> AppResult<Json<DataResponse<VoteCountResponse>>> {
    // Resolve first so a missing target reports as the target, not the vote.
    resolve_author(state, target, id).await?;

    let outcome = VoteRepo::retract(&state.pool, auth.user_id, target, id).await?;
    let response = match outcome {
        RetractOutcome::Removed { vote_count } => VoteCountResponse {
            vote_count,
            outcome: "removed",
        },
        RetractOutcome::NotVoted => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Vote",
                id,
            }));
        }
        RetractOutcome::TargetMissing => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: target.entity(),
                id,
            }));
        }
    };

    Ok(Json(DataResponse { data: response }))
}

async fn stats(
    state: &AppState,
    viewer: MaybeAuthUser,
    target: VoteTarget,
    id: DbId,
) -> AppResult<Json<DataResponse<VoteStats>>> {
    resolve_author(state, target, id).await?;

    let viewer_id = viewer.0.map(|u| u.user_id);
    let stats = VoteRepo::stats(&state.pool, target, id, viewer_id).await?;
    Ok(Json(DataResponse { data: stats }))
}
