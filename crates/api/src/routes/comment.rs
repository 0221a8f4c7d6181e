//! Route definitions for the `/comments` resource.
//!
//! Creation and listing live under `/answers/{id}/comments`.

use axum::routing::delete;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// DELETE /{id}  -> delete_comment (author/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comment::delete_comment))
}
