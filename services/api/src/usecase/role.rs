use uuid::Uuid;

use crate::domain::repository::RoleRepository;
use crate::domain::types::Role;
use crate::error::ApiError;

/// Visibility predicate: does the viewer hold TEACHER or ADMIN?
///
/// Anonymous viewers, unknown users and users without a resolvable role all
/// count as plain USER; this gates what is shown, not who may log in.
pub async fn is_teacher_or_admin<R: RoleRepository>(
    roles: &R,
    user_id: Option<Uuid>,
) -> Result<bool, ApiError> {
    let Some(user_id) = user_id else {
        return Ok(false);
    };
    Ok(roles
        .role_of_user(user_id)
        .await?
        .map(|role| role.name.is_teacher_or_admin())
        .unwrap_or(false))
}

// ── GetUserRole ──────────────────────────────────────────────────────────────

pub struct GetUserRoleUseCase<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> GetUserRoleUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Role, ApiError> {
        self.roles
            .role_of_user(user_id)
            .await?
            .ok_or_else(|| ApiError::UserNotFound(user_id.to_string()))
    }
}

// ── IsTeacherOrAdmin ─────────────────────────────────────────────────────────

pub struct IsTeacherOrAdminUseCase<R: RoleRepository> {
    pub roles: R,
}

impl<R: RoleRepository> IsTeacherOrAdminUseCase<R> {
    pub async fn execute(&self, user_id: Option<Uuid>) -> Result<bool, ApiError> {
        is_teacher_or_admin(&self.roles, user_id).await
    }
}
