use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CourseRepository, RoleRepository};
use crate::domain::types::{Course, NewCourse, Theme};
use crate::error::ApiError;
use crate::usecase::role::is_teacher_or_admin;

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<C: CourseRepository, R: RoleRepository> {
    pub courses: C,
    pub roles: R,
}

impl<C: CourseRepository, R: RoleRepository> ListCoursesUseCase<C, R> {
    pub async fn execute(&self, viewer: Option<Uuid>) -> Result<Vec<Course>, ApiError> {
        let privileged = is_teacher_or_admin(&self.roles, viewer).await?;
        self.courses.list(privileged).await
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<C: CourseRepository, R: RoleRepository> {
    pub courses: C,
    pub roles: R,
}

impl<C: CourseRepository, R: RoleRepository> GetCourseUseCase<C, R> {
    pub async fn execute(&self, id: i32, viewer: Option<Uuid>) -> Result<Course, ApiError> {
        let course = self
            .courses
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CourseNotFound(id))?;
        if course.is_disabled && !is_teacher_or_admin(&self.roles, viewer).await? {
            return Err(ApiError::CourseNotFound(id));
        }
        Ok(course)
    }
}

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> CreateCourseUseCase<C> {
    pub async fn execute(&self, input: NewCourse) -> Result<Course, ApiError> {
        self.courses.create(&input).await
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_disabled: Option<bool>,
}

pub struct UpdateCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> UpdateCourseUseCase<C> {
    pub async fn execute(&self, id: i32, input: UpdateCourseInput) -> Result<Course, ApiError> {
        let mut course = self
            .courses
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CourseNotFound(id))?;

        if let Some(name) = input.name {
            course.name = name;
        }
        if let Some(description) = input.description {
            course.description = Some(description);
        }
        if let Some(is_disabled) = input.is_disabled {
            course.is_disabled = is_disabled;
        }
        course.updated_at = Utc::now();

        self.courses.update(&course).await?;
        Ok(course)
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> DeleteCourseUseCase<C> {
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        if !self.courses.delete(id).await? {
            return Err(ApiError::CourseNotFound(id));
        }
        Ok(())
    }
}

// ── ListCourseThemes ─────────────────────────────────────────────────────────

pub struct ListCourseThemesUseCase<C: CourseRepository, R: RoleRepository> {
    pub courses: C,
    pub roles: R,
}

impl<C: CourseRepository, R: RoleRepository> ListCourseThemesUseCase<C, R> {
    pub async fn execute(&self, course_id: i32, viewer: Option<Uuid>) -> Result<Vec<Theme>, ApiError> {
        let privileged = is_teacher_or_admin(&self.roles, viewer).await?;
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or(ApiError::CourseNotFound(course_id))?;
        if course.is_disabled && !privileged {
            return Err(ApiError::CourseNotFound(course_id));
        }
        self.courses.list_themes(course_id, privileged).await
    }
}
