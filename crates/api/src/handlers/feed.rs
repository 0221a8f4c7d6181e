//! Handlers for the `/feed` resource: the ranked home feed and search.
//!
//! Both endpoints are public. Ranking policy lives in `quorum_core::feed`;
//! execution lives in `FeedRepo`.

use axum::extract::{Query, State};
use axum::Json;
use quorum_core::error::CoreError;
use quorum_core::feed::{FeedFilter, FeedSort, PageWindow, DEFAULT_PER_PAGE};
use quorum_core::search::normalize_term;
use quorum_db::models::question::QuestionPage;
use quorum_db::repositories::FeedRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /feed` and `GET /feed/search`.
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Sort mode: `trending` (default), `latest`, or `most_popular`.
    pub sort: Option<String>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size, 1-50. Defaults to 20.
    pub per_page: Option<i64>,
    /// Free-text search across title, description, and tags.
    pub q: Option<String>,
    /// Tag substring filter.
    pub tag: Option<String>,
    /// Author username substring filter.
    pub author: Option<String>,
}

/// GET /api/v1/feed
///
/// One page of the ranked question feed. An empty page is a valid result,
/// not an error.
pub async fn list_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> AppResult<Json<DataResponse<QuestionPage>>> {
    let sort = FeedSort::parse(params.sort.as_deref().unwrap_or("trending"))?;
    compose_page(&state, sort, params).await
}

/// GET /api/v1/feed/search
///
/// Same ranking as the feed with a required search term.
pub async fn search_feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> AppResult<Json<DataResponse<QuestionPage>>> {
    if normalize_term(params.q.clone()).is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Search requires a non-empty 'q' parameter".into(),
        )));
    }
    let sort = FeedSort::parse(params.sort.as_deref().unwrap_or("trending"))?;
    compose_page(&state, sort, params).await
}

async fn compose_page(
    state: &AppState,
    sort: FeedSort,
    params: FeedParams,
) -> AppResult<Json<DataResponse<QuestionPage>>> {
    let window = PageWindow::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(DEFAULT_PER_PAGE),
    )?;
    let filter = FeedFilter {
        search: normalize_term(params.q),
        tag: normalize_term(params.tag),
        author: normalize_term(params.author),
    };

    let questions = FeedRepo::compose(&state.pool, sort, &window, &filter).await?;
    let total = FeedRepo::count(&state.pool, &filter).await?;

    Ok(Json(DataResponse {
        data: QuestionPage {
            questions,
            total,
            page: window.page,
            per_page: window.per_page,
        },
    }))
}
