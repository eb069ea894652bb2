use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{User, UserRole};
use crate::error::ApiError;
use crate::extract::Identity;
use crate::state::AppState;
use crate::usecase::role::GetUserRoleUseCase;
use crate::usecase::user::{
    DeleteUserUseCase, FindUserUseCase, UpdateUserInput, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Public profile view; the blocked flag and creation time stay internal.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub nick_name: Option<String>,
    pub display_name: Option<String>,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            nick_name: user.nick_name,
            display_name: user.display_name,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct RoleResponse {
    pub name: UserRole,
}

// ── GET /api/user ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = FindUserUseCase {
        users: state.user_repo(),
        cache: state.user_cache.clone(),
    };
    let user = usecase.execute(&identity.user_id.to_string()).await?;
    Ok(Json(user.into()))
}

// ── GET /api/user/{id} ───────────────────────────────────────────────────────

pub async fn get_user(
    _identity: Identity,
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = FindUserUseCase {
        users: state.user_repo(),
        cache: state.user_cache.clone(),
    };
    let user = usecase.execute(&identifier).await?;
    Ok(Json(user.into()))
}

// ── GET /api/user/role ───────────────────────────────────────────────────────

pub async fn get_my_role(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<RoleResponse>, ApiError> {
    let usecase = GetUserRoleUseCase {
        roles: state.role_repo(),
    };
    let role = usecase.execute(identity.user_id).await?;
    Ok(Json(RoleResponse { name: role.name }))
}

// ── GET /api/user/{id}/role ──────────────────────────────────────────────────

pub async fn get_user_role(
    _identity: Identity,
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<RoleResponse>, ApiError> {
    // The identifier may be a nick name; resolve it to a user first.
    let find = FindUserUseCase {
        users: state.user_repo(),
        cache: state.user_cache.clone(),
    };
    let user = find.execute(&identifier).await?;

    let usecase = GetUserRoleUseCase {
        roles: state.role_repo(),
    };
    let role = usecase.execute(user.id).await?;
    Ok(Json(RoleResponse { name: role.name }))
}

// ── PUT /api/user ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub id: Uuid,
    pub nick_name: Option<String>,
    pub display_name: Option<String>,
    pub is_blocked: Option<bool>,
    pub role_id: Option<Uuid>,
}

pub async fn update_user(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateUserUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
        cache: state.user_cache.clone(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            UpdateUserInput {
                id: body.id,
                nick_name: body.nick_name,
                display_name: body.display_name,
                is_blocked: body.is_blocked,
                role_id: body.role_id,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /api/user/{id} ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeletedUserResponse {
    pub id: Uuid,
}

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedUserResponse>, ApiError> {
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
        cache: state.user_cache.clone(),
    };
    usecase.execute(id, identity.user_id).await?;
    Ok(Json(DeletedUserResponse { id }))
}
