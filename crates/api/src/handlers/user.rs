//! Handlers for the `/users` resource.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use quorum_core::error::CoreError;
use quorum_core::types::DbId;
use quorum_db::models::user::{UserProfile, UserResponse};
use quorum_db::repositories::{RoleRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/me
///
/// The authenticated user's own account, including email and role.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let role = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    Ok(Json(DataResponse {
        data: UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        },
    }))
}

/// GET /api/v1/users/{username}
///
/// Public profile. Deactivated accounts are hidden.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByName {
                entity: "User",
                name: username.clone(),
            })
        })?;

    Ok(Json(DataResponse {
        data: user.profile(),
    }))
}

/// GET /api/v1/users
///
/// Admin-only listing of all accounts.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;

    // Two roles exist; resolve each distinct id once.
    let mut role_names: HashMap<DbId, String> = HashMap::new();
    let mut responses = Vec::with_capacity(users.len());
    for user in users {
        let role = match role_names.get(&user.role_id) {
            Some(name) => name.clone(),
            None => {
                let name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
                role_names.insert(user.role_id, name.clone());
                name
            }
        };
        responses.push(UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        });
    }

    Ok(Json(DataResponse { data: responses }))
}

/// DELETE /api/v1/users/{username}
///
/// Admin-only soft-deactivation. The user's content and its username
/// snapshots remain in place.
pub async fn delete_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByName {
                entity: "User",
                name: username.clone(),
            })
        })?;

    UserRepo::deactivate(&state.pool, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
