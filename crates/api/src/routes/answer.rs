//! Route definitions for the `/answers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{answer, comment, vote};
use crate::state::AppState;

/// Routes mounted at `/answers`.
///
/// ```text
/// GET    /{id}           -> get_answer
/// PATCH  /{id}           -> update_answer (author)
/// DELETE /{id}           -> delete_answer (author/admin)
/// POST   /{id}/accept    -> accept_answer (question author)
///
/// POST   /{id}/comments  -> create_comment (auth)
/// GET    /{id}/comments  -> list_comments
///
/// POST   /{id}/vote      -> vote_answer (auth)
/// DELETE /{id}/vote      -> unvote_answer (auth)
/// GET    /{id}/votes     -> answer_vote_stats (optional auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(answer::get_answer)
                .patch(answer::update_answer)
                .delete(answer::delete_answer),
        )
        .route("/{id}/accept", post(answer::accept_answer))
        .route(
            "/{id}/comments",
            post(comment::create_comment).get(comment::list_comments),
        )
        .route(
            "/{id}/vote",
            post(vote::vote_answer).delete(vote::unvote_answer),
        )
        .route("/{id}/votes", get(vote::answer_vote_stats))
}
