pub mod auth;
pub mod course;
pub mod task;
pub mod theme;
pub mod user;

use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::role::IsTeacherOrAdminUseCase;

/// Gate for create/update/delete of learning content.
pub(crate) async fn require_teacher_or_admin(
    state: &AppState,
    user_id: Uuid,
) -> Result<(), ApiError> {
    let usecase = IsTeacherOrAdminUseCase {
        roles: state.role_repo(),
    };
    if usecase.execute(Some(user_id)).await? {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// User-agent string a refresh token gets bound to.
pub(crate) fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_owned()
}
