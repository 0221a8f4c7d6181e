//! Comment entity model and DTOs.

use quorum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub answer_id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a comment.
#[derive(Debug)]
pub struct CreateComment {
    pub answer_id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub body: String,
}
