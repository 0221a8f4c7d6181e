//! Feed composition over the `questions` table.
//!
//! Executes the ranking policy defined in `quorum_core::feed`. The trending
//! mode is a page-local two-tier composition: tier A (items inside the 24h
//! window, ranked by votes) takes the page's offset, and tier B (older
//! items by recency) backfills whatever tier A left open on this page, with
//! no offset of its own. The split is recomputed for every page, so deep
//! pages are not globally consistent with each other. That per-page
//! recomputation is intentional and must not be collapsed into one global
//! ranked list.

use quorum_core::feed::{self, FeedFilter, FeedSort, PageWindow};
use quorum_core::search::contains_pattern;
use quorum_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::Question;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, author_username, title, description, tags, \
                        vote_count, is_closed, created_at, updated_at";

/// Conjunctive pre-ranking filter. Bind positions 1-3 are the optional
/// search/tag/author ILIKE patterns; absent filters bind NULL and pass.
const FILTER: &str = "($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1 OR tags ILIKE $1)
               AND ($2::text IS NULL OR tags ILIKE $2)
               AND ($3::text IS NULL OR author_username ILIKE $3)";

/// Escaped ILIKE patterns for the three filter binds.
fn patterns(filter: &FeedFilter) -> (Option<String>, Option<String>, Option<String>) {
    (
        filter.search.as_deref().map(contains_pattern),
        filter.tag.as_deref().map(contains_pattern),
        filter.author.as_deref().map(contains_pattern),
    )
}

/// Composes ranked, filtered, paginated feed pages.
pub struct FeedRepo;

impl FeedRepo {
    /// Produce one feed page. Each call re-evaluates against current store
    /// state; an empty page is not an error.
    pub async fn compose(
        pool: &PgPool,
        sort: FeedSort,
        window: &PageWindow,
        filter: &FeedFilter,
    ) -> Result<Vec<Question>, sqlx::Error> {
        match sort {
            FeedSort::Latest => {
                Self::ranked(pool, window, filter, "created_at DESC, id DESC").await
            }
            FeedSort::MostPopular => {
                Self::ranked(pool, window, filter, "vote_count DESC, created_at DESC, id DESC")
                    .await
            }
            FeedSort::Trending => Self::trending(pool, window, filter).await,
        }
    }

    /// Total number of questions matching the filter (for pagination
    /// envelopes). Sort-independent.
    pub async fn count(pool: &PgPool, filter: &FeedFilter) -> Result<i64, sqlx::Error> {
        let (search, tag, author) = patterns(filter);
        let (count,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM questions WHERE {FILTER}"))
                .bind(search)
                .bind(tag)
                .bind(author)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Single-query modes: one ORDER BY, offset applied directly.
    async fn ranked(
        pool: &PgPool,
        window: &PageWindow,
        filter: &FeedFilter,
        order_by: &str,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let (search, tag, author) = patterns(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE {FILTER}
             ORDER BY {order_by}
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(search)
            .bind(tag)
            .bind(author)
            .bind(window.per_page)
            .bind(window.offset())
            .fetch_all(pool)
            .await
    }

    /// Two-tier trending composition, recomputed per page.
    async fn trending(
        pool: &PgPool,
        window: &PageWindow,
        filter: &FeedFilter,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let (search, tag, author) = patterns(filter);
        let cutoff = feed::trending_cutoff();

        // Tier A: inside the window, ranked by votes. The page offset
        // applies here only.
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE {FILTER}
               AND created_at >= $4
             ORDER BY vote_count DESC, created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        let mut page = sqlx::query_as::<_, Question>(&query)
            .bind(&search)
            .bind(&tag)
            .bind(&author)
            .bind(cutoff)
            .bind(window.per_page)
            .bind(window.offset())
            .fetch_all(pool)
            .await?;

        let remainder = feed::backfill_limit(window.per_page, page.len());
        if remainder == 0 {
            return Ok(page);
        }

        // Tier B: older items by recency fill the rest of the page. Ids
        // already placed by this page's tier A slice are excluded; tier B
        // always starts from its own most recent item.
        let exclude: Vec<DbId> = page.iter().map(|q| q.id).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE {FILTER}
               AND created_at < $4
               AND NOT (id = ANY($5))
             ORDER BY created_at DESC, id DESC
             LIMIT $6"
        );
        let backfill = sqlx::query_as::<_, Question>(&query)
            .bind(&search)
            .bind(&tag)
            .bind(&author)
            .bind(cutoff)
            .bind(&exclude)
            .bind(remainder)
            .fetch_all(pool)
            .await?;

        page.extend(backfill);
        Ok(page)
    }
}
