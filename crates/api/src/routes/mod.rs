pub mod answer;
pub mod auth;
pub mod comment;
pub mod feed;
pub mod health;
pub mod notification;
pub mod question;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      register (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
///
/// /feed                             ranked question feed (public)
/// /feed/search                      feed with required search term (public)
///
/// /questions                        create (auth)
/// /questions/{id}                   get, patch (author), delete (author/admin)
/// /questions/{id}/answers           create (auth), list
/// /questions/{id}/vote              cast (POST), retract (DELETE)
/// /questions/{id}/votes             ledger stats (optional auth)
///
/// /answers/{id}                     get, patch (author), delete (author/admin)
/// /answers/{id}/accept              accept (question author)
/// /answers/{id}/comments            create (auth), list
/// /answers/{id}/vote                cast (POST), retract (DELETE)
/// /answers/{id}/votes               ledger stats (optional auth)
///
/// /comments/{id}                    delete (author/admin)
///
/// /notifications                    list (auth)
/// /notifications/read-all           mark all read
/// /notifications/unread-count       unread count
/// /notifications/{id}/read          mark one read
///
/// /users/me                         own account (auth)
/// /users/{username}                 public profile
/// /users                            list (admin)
/// /users/{username}                 deactivate (admin, DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/feed", feed::router())
        .nest("/questions", question::router())
        .nest("/answers", answer::router())
        .nest("/comments", comment::router())
        .nest("/notifications", notification::router())
        .nest("/users", user::router())
}
