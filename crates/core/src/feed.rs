//! Feed ranking policy: sort modes, pagination windows, and the trending
//! two-tier composition plan.
//!
//! This module owns the *policy* of feed assembly; the repository layer in
//! `quorum-db` executes it against Postgres. Keeping the policy here makes
//! the tie-break and backfill rules unit-testable without a database.

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Items newer than this window qualify for the trending feed's first tier.
pub const TRENDING_WINDOW_HOURS: i64 = 24;

/// Default page size when the caller does not specify one.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Maximum allowed page size.
pub const MAX_PER_PAGE: i64 = 50;

// ---------------------------------------------------------------------------
// Sort modes
// ---------------------------------------------------------------------------

/// Feed sort mode.
///
/// - `Latest`: newest first.
/// - `MostPopular`: highest vote count first, newest first on ties.
/// - `Trending`: recent high-vote items first, backfilled by recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSort {
    Trending,
    Latest,
    MostPopular,
}

impl FeedSort {
    /// Parse a sort mode from its wire representation.
    ///
    /// Unknown values are a validation error so the HTTP layer returns 400.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "trending" => Ok(FeedSort::Trending),
            "latest" => Ok(FeedSort::Latest),
            "most_popular" => Ok(FeedSort::MostPopular),
            other => Err(CoreError::Validation(format!(
                "Unknown sort mode '{other}'. Expected one of: trending, latest, most_popular"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedSort::Trending => "trending",
            FeedSort::Latest => "latest",
            FeedSort::MostPopular => "most_popular",
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A validated pagination window (`page` is 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
}

impl PageWindow {
    /// Validate a pagination window: `page >= 1`, `1 <= per_page <= MAX_PER_PAGE`.
    pub fn new(page: i64, per_page: i64) -> Result<Self, CoreError> {
        if page < 1 {
            return Err(CoreError::Validation(format!(
                "page must be >= 1, got {page}"
            )));
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(CoreError::Validation(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {per_page}"
            )));
        }
        Ok(PageWindow { page, per_page })
    }

    /// Row offset for this window: `(page - 1) * per_page`.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

/// How many rows tier B may contribute after tier A produced `tier_a_len`
/// rows for the current page. Never negative.
pub fn backfill_limit(per_page: i64, tier_a_len: usize) -> i64 {
    (per_page - tier_a_len as i64).max(0)
}

/// The `created_at` cutoff separating trending tier A (recent) from tier B
/// (backfill), evaluated at call time.
pub fn trending_cutoff() -> Timestamp {
    Utc::now() - Duration::hours(TRENDING_WINDOW_HOURS)
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Optional pre-ranking filters, conjunctive between fields.
///
/// `search` matches title OR description OR tags; `tag` and `author` match
/// their single field. All matches are case-insensitive substring matches.
/// Fields hold the raw user terms; the repository layer converts them to
/// escaped ILIKE patterns.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub author: Option<String>,
}

impl FeedFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.tag.is_none() && self.author.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
