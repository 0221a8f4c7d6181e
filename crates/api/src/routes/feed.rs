//! Route definitions for the `/feed` resource. All endpoints are public.

use axum::routing::get;
use axum::Router;

use crate::handlers::feed;
use crate::state::AppState;

/// Routes mounted at `/feed`.
///
/// ```text
/// GET /        -> list_feed
/// GET /search  -> search_feed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(feed::list_feed))
        .route("/search", get(feed::search_feed))
}
