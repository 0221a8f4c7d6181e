//! Repository-level tests for the vote ledger: transition semantics, the
//! denormalized-count invariant, and concurrent casts.

use quorum_core::voting::VoteTarget;
use quorum_db::models::vote::{CastOutcome, RetractOutcome};
use quorum_db::repositories::VoteRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (username, email, password_hash, role_id)
         VALUES ($1, $1 || '@example.com', 'not-a-real-hash',
                 (SELECT id FROM roles WHERE name = 'user'))
         RETURNING id",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

async fn seed_question(pool: &PgPool, author_id: i64, title: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO questions (author_id, author_username, title, description)
         VALUES ($1, 'seeded', $2, 'body')
         RETURNING id",
    )
    .bind(author_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

async fn stored_count(pool: &PgPool, question_id: i64) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT vote_count FROM questions WHERE id = $1")
        .bind(question_id)
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

/// The invariant: the denormalized count equals the ledger-derived count.
async fn assert_count_matches_ledger(pool: &PgPool, question_id: i64) {
    let stats = VoteRepo::stats(pool, VoteTarget::Question, question_id, None)
        .await
        .unwrap();
    assert_eq!(
        stored_count(pool, question_id).await,
        stats.upvotes - stats.downvotes,
        "vote_count must equal upvote rows minus downvote rows"
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn cast_flip_retract_sequence_keeps_the_invariant(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let voter = seed_user(&pool, "voter").await;
    let question = seed_question(&pool, author, "Q").await;

    // First cast: create, +1.
    let outcome = VoteRepo::cast(&pool, voter, VoteTarget::Question, question, true)
        .await
        .unwrap();
    assert_eq!(outcome, CastOutcome::Accepted { vote_count: 1 });
    assert_count_matches_ledger(&pool, question).await;

    // Same polarity: noop, count untouched.
    let outcome = VoteRepo::cast(&pool, voter, VoteTarget::Question, question, true)
        .await
        .unwrap();
    assert_eq!(outcome, CastOutcome::Noop { vote_count: 1 });
    assert_count_matches_ledger(&pool, question).await;

    // Opposite polarity: flip, exactly -2.
    let outcome = VoteRepo::cast(&pool, voter, VoteTarget::Question, question, false)
        .await
        .unwrap();
    assert_eq!(outcome, CastOutcome::Accepted { vote_count: -1 });
    assert_count_matches_ledger(&pool, question).await;

    // Retract: row gone, count restored.
    let outcome = VoteRepo::retract(&pool, voter, VoteTarget::Question, question)
        .await
        .unwrap();
    assert_eq!(outcome, RetractOutcome::Removed { vote_count: 0 });
    assert_count_matches_ledger(&pool, question).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn a_voter_never_holds_two_ledger_rows(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let voter = seed_user(&pool, "voter").await;
    let question = seed_question(&pool, author, "Q").await;

    for polarity in [true, true, false, true, false] {
        VoteRepo::cast(&pool, voter, VoteTarget::Question, question, polarity)
            .await
            .unwrap();
    }

    let (rows,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM votes
         WHERE voter_id = $1 AND target_id = $2 AND target_kind = 'question'",
    )
    .bind(voter)
    .bind(question)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retracting_without_a_vote_changes_nothing(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let voter = seed_user(&pool, "voter").await;
    let question = seed_question(&pool, author, "Q").await;

    let outcome = VoteRepo::retract(&pool, voter, VoteTarget::Question, question)
        .await
        .unwrap();
    assert_eq!(outcome, RetractOutcome::NotVoted);
    assert_eq!(stored_count(&pool, question).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn operations_on_a_missing_target_report_it(pool: PgPool) {
    let voter = seed_user(&pool, "voter").await;

    let outcome = VoteRepo::cast(&pool, voter, VoteTarget::Question, 999_999, true)
        .await
        .unwrap();
    assert_eq!(outcome, CastOutcome::TargetMissing);

    let outcome = VoteRepo::retract(&pool, voter, VoteTarget::Question, 999_999)
        .await
        .unwrap();
    assert_eq!(outcome, RetractOutcome::TargetMissing);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn question_and_answer_ledgers_are_disjoint(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let voter = seed_user(&pool, "voter").await;
    let question = seed_question(&pool, author, "Q").await;

    // An answer that happens to share the question's numeric id space.
    let (answer,): (i64,) = sqlx::query_as(
        "INSERT INTO answers (question_id, author_id, author_username, body)
         VALUES ($1, $2, 'seeded', 'a body')
         RETURNING id",
    )
    .bind(question)
    .bind(author)
    .fetch_one(&pool)
    .await
    .unwrap();

    VoteRepo::cast(&pool, voter, VoteTarget::Question, question, true)
        .await
        .unwrap();
    let outcome = VoteRepo::cast(&pool, voter, VoteTarget::Answer, answer, false)
        .await
        .unwrap();
    assert_eq!(outcome, CastOutcome::Accepted { vote_count: -1 });

    // Both rows exist; target_kind separates them.
    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes WHERE voter_id = $1")
        .bind(voter)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_casts_by_distinct_voters_both_land(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let question = seed_question(&pool, author, "Q").await;

    let (a, b) = tokio::join!(
        VoteRepo::cast(&pool, alice, VoteTarget::Question, question, true),
        VoteRepo::cast(&pool, bob, VoteTarget::Question, question, true),
    );
    assert!(matches!(a.unwrap(), CastOutcome::Accepted { .. }));
    assert!(matches!(b.unwrap(), CastOutcome::Accepted { .. }));

    assert_eq!(stored_count(&pool, question).await, 2);
    assert_count_matches_ledger(&pool, question).await;
}
