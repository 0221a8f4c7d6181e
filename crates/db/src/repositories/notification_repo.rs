//! Repository for the `notifications` table.

use quorum_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{Notification, NotificationKind};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, kind, body, is_read, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        kind: NotificationKind,
        body: &str,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, kind, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(kind.as_str())
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// List a user's notifications, newest first, optionally unread only.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE user_id = $1 AND ($2 = false OR is_read = false)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(unread_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark one notification as read, scoped to its owner.
    ///
    /// Returns `false` if the notification does not exist or belongs to a
    /// different user.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = true WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all of a user's notifications as read. Returns the count marked.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = true WHERE user_id = $1 AND is_read = false")
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
