use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Course, NewCourse, Theme};
use crate::error::ApiError;
use crate::extract::{Identity, MaybeIdentity};
use crate::handlers::require_teacher_or_admin;
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase, ListCourseThemesUseCase,
    ListCoursesUseCase, UpdateCourseInput, UpdateCourseUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
            description: course.description,
            is_disabled: course.is_disabled,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct ThemeResponse {
    pub id: i32,
    pub course_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id,
            course_id: theme.course_id,
            name: theme.name,
            description: theme.description,
            is_disabled: theme.is_disabled,
        }
    }
}

// ── GET /api/learning/course ─────────────────────────────────────────────────

pub async fn list_courses(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let usecase = ListCoursesUseCase {
        courses: state.course_repo(),
        roles: state.role_repo(),
    };
    let courses = usecase.execute(identity.map(|i| i.user_id)).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

// ── POST /api/learning/course ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
}

pub async fn create_course(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = CreateCourseUseCase {
        courses: state.course_repo(),
    };
    let course = usecase
        .execute(NewCourse {
            name: body.name,
            description: body.description,
            is_disabled: body.is_disabled,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

// ── GET /api/learning/course/{id} ────────────────────────────────────────────

pub async fn get_course(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CourseResponse>, ApiError> {
    let usecase = GetCourseUseCase {
        courses: state.course_repo(),
        roles: state.role_repo(),
    };
    let course = usecase.execute(id, identity.map(|i| i.user_id)).await?;
    Ok(Json(course.into()))
}

// ── PUT /api/learning/course/{id} ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_disabled: Option<bool>,
}

pub async fn update_course(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = UpdateCourseUseCase {
        courses: state.course_repo(),
    };
    let course = usecase
        .execute(
            id,
            UpdateCourseInput {
                name: body.name,
                description: body.description,
                is_disabled: body.is_disabled,
            },
        )
        .await?;
    Ok(Json(course.into()))
}

// ── DELETE /api/learning/course/{id} ─────────────────────────────────────────

pub async fn delete_course(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = DeleteCourseUseCase {
        courses: state.course_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/learning/course/{id}/themes ─────────────────────────────────────

pub async fn list_course_themes(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ThemeResponse>>, ApiError> {
    let usecase = ListCourseThemesUseCase {
        courses: state.course_repo(),
        roles: state.role_repo(),
    };
    let themes = usecase.execute(id, identity.map(|i| i.user_id)).await?;
    Ok(Json(themes.into_iter().map(Into::into).collect()))
}
