//! Repository for the `answers` table.

use quorum_core::types::DbId;
use sqlx::PgPool;

use crate::models::answer::{Answer, CreateAnswer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question_id, author_id, author_username, body, \
                        is_accepted, vote_count, created_at, updated_at";

/// Provides CRUD operations for answers.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert a new answer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAnswer) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "INSERT INTO answers (question_id, author_id, author_username, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(input.question_id)
            .bind(input.author_id)
            .bind(&input.author_username)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find an answer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a question's answers: accepted answer first, then by vote count,
    /// then newest first.
    pub async fn list_for_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<Answer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM answers
             WHERE question_id = $1
             ORDER BY is_accepted DESC, vote_count DESC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    /// Replace an answer's body. Returns `None` if the row does not exist.
    pub async fn update_body(
        pool: &PgPool,
        id: DbId,
        body: &str,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!(
            "UPDATE answers SET body = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .bind(body)
            .fetch_optional(pool)
            .await
    }

    /// Mark an answer as accepted, clearing any previously accepted answer
    /// on the same question in the same transaction. A question holds at
    /// most one accepted answer.
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
        question_id: DbId,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE answers SET is_accepted = false, updated_at = NOW()
             WHERE question_id = $1 AND is_accepted = true AND id <> $2",
        )
        .bind(question_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE answers SET is_accepted = true, updated_at = NOW()
             WHERE id = $1 AND question_id = $2
             RETURNING {COLUMNS}"
        );
        let answer = sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .bind(question_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(answer)
    }

    /// Delete an answer, purging its ledger rows in the same transaction.
    /// Comments cascade via their FK.
    ///
    /// Returns `true` if the answer existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM votes WHERE target_kind = 'answer' AND target_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
