//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the repositories in `quorum_db` and map errors via
//! [`AppError`](crate::error::AppError).

use quorum_core::error::CoreError;
use quorum_core::roles::ROLE_ADMIN;
use quorum_core::types::DbId;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;

pub mod answer;
pub mod auth;
pub mod comment;
pub mod feed;
pub mod notification;
pub mod question;
pub mod user;
pub mod vote;

/// Reject unless the caller authored the content.
pub(crate) fn ensure_author(user: &AuthUser, author_id: DbId) -> Result<(), AppError> {
    if user.user_id != author_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can modify this content".into(),
        )));
    }
    Ok(())
}

/// Reject unless the caller authored the content or is an admin.
pub(crate) fn ensure_author_or_admin(user: &AuthUser, author_id: DbId) -> Result<(), AppError> {
    if user.user_id != author_id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an admin can remove this content".into(),
        )));
    }
    Ok(())
}
