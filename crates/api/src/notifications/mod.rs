//! In-request notification fan-out.
//!
//! Notifications are plain rows created synchronously by the request that
//! triggers them; there is no delivery pipeline. Three triggers exist:
//! an answer on your question, a comment on your answer, and an @mention
//! in any body text.

use quorum_core::mentions::extract_mentions;
use quorum_core::types::DbId;
use quorum_db::models::answer::Answer;
use quorum_db::models::notification::NotificationKind;
use quorum_db::models::question::Question;
use quorum_db::repositories::{NotificationRepo, UserRepo};
use sqlx::PgPool;

/// Notify a question's author that someone answered it. Self-answers
/// produce no notification.
pub async fn answer_posted(
    pool: &PgPool,
    question: &Question,
    answerer_id: DbId,
    answerer_username: &str,
) -> Result<(), sqlx::Error> {
    if question.author_id == answerer_id {
        return Ok(());
    }
    let body = format!(
        "{answerer_username} answered your question: '{}'",
        question.title
    );
    NotificationRepo::create(pool, question.author_id, NotificationKind::Answer, &body).await?;
    Ok(())
}

/// Notify an answer's author that someone commented on it. Self-comments
/// produce no notification.
pub async fn comment_posted(
    pool: &PgPool,
    answer: &Answer,
    question_title: &str,
    commenter_id: DbId,
    commenter_username: &str,
) -> Result<(), sqlx::Error> {
    if answer.author_id == commenter_id {
        return Ok(());
    }
    let body =
        format!("{commenter_username} commented on your answer to: '{question_title}'");
    NotificationRepo::create(pool, answer.author_id, NotificationKind::Comment, &body).await?;
    Ok(())
}

/// Scan `text` for @mentions and notify each mentioned user that exists.
///
/// The actor never gets a mention notification for their own text, and
/// `already_notified` suppresses double-notifying a user who just received
/// the direct answer/comment notification for the same event.
pub async fn mentions_posted(
    pool: &PgPool,
    text: &str,
    actor_id: DbId,
    actor_username: &str,
    context: &str,
    context_title: &str,
    already_notified: &[DbId],
) -> Result<(), sqlx::Error> {
    for name in extract_mentions(text) {
        let Some(user) = UserRepo::find_by_username(pool, &name).await? else {
            continue;
        };
        if user.id == actor_id || already_notified.contains(&user.id) {
            continue;
        }
        let body = format!(
            "{actor_username} mentioned you in a {context}: '{context_title}'"
        );
        NotificationRepo::create(pool, user.id, NotificationKind::Mention, &body).await?;
    }
    Ok(())
}
