//! Notification entity model and DTOs.

use quorum_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Notification categories, matching the `notifications.kind` CHECK
/// constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Answer,
    Comment,
    Mention,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Answer => "answer",
            NotificationKind::Comment => "comment",
            NotificationKind::Mention => "mention",
        }
    }
}

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}
