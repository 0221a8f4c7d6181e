//! Repository layer: stateless structs with associated async functions over
//! `&PgPool`. Domain checks (ownership, self-vote) live in the handlers;
//! repositories own the SQL and the transactions.

mod answer_repo;
mod comment_repo;
mod feed_repo;
mod notification_repo;
mod question_repo;
mod role_repo;
mod session_repo;
mod user_repo;
mod vote_repo;

pub use answer_repo::AnswerRepo;
pub use comment_repo::CommentRepo;
pub use feed_repo::FeedRepo;
pub use notification_repo::NotificationRepo;
pub use question_repo::QuestionRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
