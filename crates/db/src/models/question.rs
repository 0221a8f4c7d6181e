//! Question entity model and DTOs.

use quorum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `questions` table.
///
/// `author_username` is a snapshot taken at creation time and intentionally
/// goes stale if the author later renames themselves. `vote_count` is owned
/// by the vote ledger and may go negative.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub title: String,
    pub description: String,
    pub tags: Option<String>,
    pub vote_count: i64,
    pub is_closed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a question. The author snapshot is resolved by the
/// handler from the authenticated principal.
#[derive(Debug)]
pub struct CreateQuestion {
    pub author_id: DbId,
    pub author_username: String,
    pub title: String,
    pub description: String,
    pub tags: Option<String>,
}

/// DTO for patching a question. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdateQuestion {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub is_closed: Option<bool>,
}

/// One page of the feed plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
