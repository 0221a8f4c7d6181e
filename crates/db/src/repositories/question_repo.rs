//! Repository for the `questions` table.

use quorum_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question, UpdateQuestion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, author_username, title, description, tags, \
                        vote_count, is_closed, created_at, updated_at";

/// Provides CRUD operations for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (author_id, author_username, title, description, tags)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.author_id)
            .bind(&input.author_username)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a question by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Patch a question. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuestion,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                tags = COALESCE($4, tags),
                is_closed = COALESCE($5, is_closed),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tags)
            .bind(input.is_closed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a question and everything hanging off it in one transaction:
    /// ledger rows for the question and its answers, comments, and the
    /// answers themselves.
    ///
    /// Returns `true` if the question existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM votes
             WHERE target_kind = 'answer'
               AND target_id IN (SELECT id FROM answers WHERE question_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM votes WHERE target_kind = 'question' AND target_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Comments and answers cascade via their FKs.
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
