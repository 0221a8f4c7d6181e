//! Route definitions for the `/questions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{answer, question, vote};
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// POST   /               -> create_question (auth)
/// GET    /{id}           -> get_question
/// PATCH  /{id}           -> update_question (author)
/// DELETE /{id}           -> delete_question (author/admin)
///
/// POST   /{id}/answers   -> create_answer (auth)
/// GET    /{id}/answers   -> list_answers
///
/// POST   /{id}/vote      -> vote_question (auth)
/// DELETE /{id}/vote      -> unvote_question (auth)
/// GET    /{id}/votes     -> question_vote_stats (optional auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(question::create_question))
        .route(
            "/{id}",
            get(question::get_question)
                .patch(question::update_question)
                .delete(question::delete_question),
        )
        .route(
            "/{id}/answers",
            post(answer::create_answer).get(answer::list_answers),
        )
        .route(
            "/{id}/vote",
            post(vote::vote_question).delete(vote::unvote_question),
        )
        .route("/{id}/votes", get(vote::question_vote_stats))
}
