use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::domain::types::NewTheme;
use crate::error::ApiError;
use crate::extract::{Identity, MaybeIdentity};
use crate::handlers::course::ThemeResponse;
use crate::handlers::require_teacher_or_admin;
use crate::handlers::task::TaskResponse;
use crate::state::AppState;
use crate::usecase::theme::{
    CreateThemeUseCase, DeleteThemeUseCase, GetThemeUseCase, ListThemeTasksUseCase,
    ListThemesUseCase, UpdateThemeInput, UpdateThemeUseCase,
};

// ── GET /api/learning/theme ──────────────────────────────────────────────────

pub async fn list_themes(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<ThemeResponse>>, ApiError> {
    let usecase = ListThemesUseCase {
        themes: state.theme_repo(),
        roles: state.role_repo(),
    };
    let themes = usecase.execute(identity.map(|i| i.user_id)).await?;
    Ok(Json(themes.into_iter().map(Into::into).collect()))
}

// ── POST /api/learning/theme ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateThemeRequest {
    pub course_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
}

pub async fn create_theme(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateThemeRequest>,
) -> Result<(StatusCode, Json<ThemeResponse>), ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = CreateThemeUseCase {
        themes: state.theme_repo(),
    };
    let theme = usecase
        .execute(NewTheme {
            course_id: body.course_id,
            name: body.name,
            description: body.description,
            is_disabled: body.is_disabled,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(theme.into())))
}

// ── GET /api/learning/theme/{id} ─────────────────────────────────────────────

pub async fn get_theme(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ThemeResponse>, ApiError> {
    let usecase = GetThemeUseCase {
        themes: state.theme_repo(),
        roles: state.role_repo(),
    };
    let theme = usecase.execute(id, identity.map(|i| i.user_id)).await?;
    Ok(Json(theme.into()))
}

// ── PUT /api/learning/theme/{id} ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateThemeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_disabled: Option<bool>,
}

pub async fn update_theme(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateThemeRequest>,
) -> Result<Json<ThemeResponse>, ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = UpdateThemeUseCase {
        themes: state.theme_repo(),
    };
    let theme = usecase
        .execute(
            id,
            UpdateThemeInput {
                name: body.name,
                description: body.description,
                is_disabled: body.is_disabled,
            },
        )
        .await?;
    Ok(Json(theme.into()))
}

// ── DELETE /api/learning/theme/{id} ──────────────────────────────────────────

pub async fn delete_theme(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = DeleteThemeUseCase {
        themes: state.theme_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/learning/theme/{id}/tasks ───────────────────────────────────────

pub async fn list_theme_tasks(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let usecase = ListThemeTasksUseCase {
        themes: state.theme_repo(),
        roles: state.role_repo(),
    };
    let tasks = usecase.execute(id, identity.map(|i| i.user_id)).await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}
