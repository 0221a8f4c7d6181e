//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /            -> list_users (admin)
/// GET    /me          -> me (auth)
/// GET    /{username}  -> get_user (public profile)
/// DELETE /{username}  -> delete_user (admin, soft-deactivate)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users))
        .route("/me", get(user::me))
        .route(
            "/{username}",
            get(user::get_user).delete(user::delete_user),
        )
}
