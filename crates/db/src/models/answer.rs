//! Answer entity model and DTOs.

use quorum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `answers` table. Same snapshot and vote-count conventions
/// as questions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub body: String,
    pub is_accepted: bool,
    pub vote_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an answer.
#[derive(Debug)]
pub struct CreateAnswer {
    pub question_id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub body: String,
}
