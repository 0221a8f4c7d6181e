//! Repository for the `votes` ledger.
//!
//! Cast and retract run as single transactions: the target row is locked
//! with `FOR UPDATE` first, which serializes concurrent operations on the
//! same target (including duplicate rapid clicks from one voter), then the
//! ledger row and the denormalized `vote_count` are mutated together. The
//! `uq_votes_voter_target` constraint backstops the create race; if it ever
//! fires the HTTP layer reports 409.
//!
//! Self-vote rejection and target resolution for error messages happen in
//! the handlers, before these functions are called.

use quorum_core::types::DbId;
use quorum_core::voting::{self, CastAction, VoteTarget};
use sqlx::PgPool;

use crate::models::vote::{CastOutcome, RetractOutcome, VoteStats};

/// Table holding the denormalized count for a target kind.
fn target_table(target: VoteTarget) -> &'static str {
    match target {
        VoteTarget::Question => "questions",
        VoteTarget::Answer => "answers",
    }
}

/// Provides transactional vote ledger operations.
pub struct VoteRepo;

impl VoteRepo {
    /// Cast or toggle a vote.
    ///
    /// - No existing ledger row: insert one, count moves by +/-1.
    /// - Same polarity exists: no-op, nothing written.
    /// - Opposite polarity exists: flip the row in place, count moves by
    ///   +/-2.
    pub async fn cast(
        pool: &PgPool,
        voter_id: DbId,
        target: VoteTarget,
        target_id: DbId,
        is_upvote: bool,
    ) -> Result<CastOutcome, sqlx::Error> {
        let table = target_table(target);
        let mut tx = pool.begin().await?;

        let locked: Option<(i64,)> =
            sqlx::query_as(&format!("SELECT vote_count FROM {table} WHERE id = $1 FOR UPDATE"))
                .bind(target_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((current_count,)) = locked else {
            return Ok(CastOutcome::TargetMissing);
        };

        let existing: Option<(bool,)> = sqlx::query_as(
            "SELECT is_upvote FROM votes
             WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3",
        )
        .bind(voter_id)
        .bind(target_id)
        .bind(target.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let action = voting::cast_action(existing.map(|(up,)| up), is_upvote);
        let delta = match action {
            CastAction::Noop => {
                tx.commit().await?;
                return Ok(CastOutcome::Noop {
                    vote_count: current_count,
                });
            }
            CastAction::Create { delta } => {
                sqlx::query(
                    "INSERT INTO votes (voter_id, target_id, target_kind, is_upvote)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(voter_id)
                .bind(target_id)
                .bind(target.as_str())
                .bind(is_upvote)
                .execute(&mut *tx)
                .await?;
                delta
            }
            CastAction::Flip { delta } => {
                sqlx::query(
                    "UPDATE votes SET is_upvote = $4, updated_at = NOW()
                     WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3",
                )
                .bind(voter_id)
                .bind(target_id)
                .bind(target.as_str())
                .bind(is_upvote)
                .execute(&mut *tx)
                .await?;
                delta
            }
        };

        let (vote_count,): (i64,) = sqlx::query_as(&format!(
            "UPDATE {table} SET vote_count = vote_count + $2 WHERE id = $1 RETURNING vote_count"
        ))
        .bind(target_id)
        .bind(delta)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CastOutcome::Accepted { vote_count })
    }

    /// Retract a voter's vote from a target, restoring the count.
    pub async fn retract(
        pool: &PgPool,
        voter_id: DbId,
        target: VoteTarget,
        target_id: DbId,
    ) -> Result<RetractOutcome, sqlx::Error> {
        let table = target_table(target);
        let mut tx = pool.begin().await?;

        let locked: Option<(i64,)> =
            sqlx::query_as(&format!("SELECT vote_count FROM {table} WHERE id = $1 FOR UPDATE"))
                .bind(target_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(RetractOutcome::TargetMissing);
        }

        let removed: Option<(bool,)> = sqlx::query_as(
            "DELETE FROM votes
             WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3
             RETURNING is_upvote",
        )
        .bind(voter_id)
        .bind(target_id)
        .bind(target.as_str())
        .fetch_optional(&mut *tx)
        .await?;
        let Some((was_upvote,)) = removed else {
            return Ok(RetractOutcome::NotVoted);
        };

        let (vote_count,): (i64,) = sqlx::query_as(&format!(
            "UPDATE {table} SET vote_count = vote_count + $2 WHERE id = $1 RETURNING vote_count"
        ))
        .bind(target_id)
        .bind(voting::retract_delta(was_upvote))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(RetractOutcome::Removed { vote_count })
    }

    /// Recompute aggregate stats straight from the ledger (audit view; the
    /// denormalized count never feeds this).
    pub async fn stats(
        pool: &PgPool,
        target: VoteTarget,
        target_id: DbId,
        viewer_id: Option<DbId>,
    ) -> Result<VoteStats, sqlx::Error> {
        let (total_votes, upvotes, downvotes): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE is_upvote),
                    COUNT(*) FILTER (WHERE NOT is_upvote)
             FROM votes
             WHERE target_kind = $1 AND target_id = $2",
        )
        .bind(target.as_str())
        .bind(target_id)
        .fetch_one(pool)
        .await?;

        let viewer_vote = match viewer_id {
            Some(viewer) => sqlx::query_as::<_, (bool,)>(
                "SELECT is_upvote FROM votes
                 WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3",
            )
            .bind(viewer)
            .bind(target_id)
            .bind(target.as_str())
            .fetch_optional(pool)
            .await?
            .map(|(up,)| up),
            None => None,
        };

        Ok(VoteStats {
            target_id,
            total_votes,
            upvotes,
            downvotes,
            viewer_vote,
        })
    }
}
