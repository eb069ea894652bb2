use uuid::Uuid;

use crate::domain::repository::{RoleRepository, ThemeRepository};
use crate::domain::types::{NewTheme, Task, Theme};
use crate::error::ApiError;
use crate::usecase::role::is_teacher_or_admin;

// ── ListThemes ───────────────────────────────────────────────────────────────

pub struct ListThemesUseCase<T: ThemeRepository, R: RoleRepository> {
    pub themes: T,
    pub roles: R,
}

impl<T: ThemeRepository, R: RoleRepository> ListThemesUseCase<T, R> {
    pub async fn execute(&self, viewer: Option<Uuid>) -> Result<Vec<Theme>, ApiError> {
        let privileged = is_teacher_or_admin(&self.roles, viewer).await?;
        self.themes.list(privileged).await
    }
}

// ── GetTheme ─────────────────────────────────────────────────────────────────

pub struct GetThemeUseCase<T: ThemeRepository, R: RoleRepository> {
    pub themes: T,
    pub roles: R,
}

impl<T: ThemeRepository, R: RoleRepository> GetThemeUseCase<T, R> {
    pub async fn execute(&self, id: i32, viewer: Option<Uuid>) -> Result<Theme, ApiError> {
        let theme = self
            .themes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ThemeNotFound(id))?;
        if theme.is_disabled && !is_teacher_or_admin(&self.roles, viewer).await? {
            return Err(ApiError::ThemeNotFound(id));
        }
        Ok(theme)
    }
}

// ── CreateTheme ──────────────────────────────────────────────────────────────

pub struct CreateThemeUseCase<T: ThemeRepository> {
    pub themes: T,
}

impl<T: ThemeRepository> CreateThemeUseCase<T> {
    pub async fn execute(&self, input: NewTheme) -> Result<Theme, ApiError> {
        self.themes.create(&input).await
    }
}

// ── UpdateTheme ──────────────────────────────────────────────────────────────

pub struct UpdateThemeInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_disabled: Option<bool>,
}

pub struct UpdateThemeUseCase<T: ThemeRepository> {
    pub themes: T,
}

impl<T: ThemeRepository> UpdateThemeUseCase<T> {
    pub async fn execute(&self, id: i32, input: UpdateThemeInput) -> Result<Theme, ApiError> {
        let mut theme = self
            .themes
            .find_by_id(id)
            .await?
            .ok_or(ApiError::ThemeNotFound(id))?;

        if let Some(name) = input.name {
            theme.name = name;
        }
        if let Some(description) = input.description {
            theme.description = Some(description);
        }
        if let Some(is_disabled) = input.is_disabled {
            theme.is_disabled = is_disabled;
        }

        self.themes.update(&theme).await?;
        Ok(theme)
    }
}

// ── DeleteTheme ──────────────────────────────────────────────────────────────

pub struct DeleteThemeUseCase<T: ThemeRepository> {
    pub themes: T,
}

impl<T: ThemeRepository> DeleteThemeUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        if !self.themes.delete(id).await? {
            return Err(ApiError::ThemeNotFound(id));
        }
        Ok(())
    }
}

// ── ListThemeTasks ───────────────────────────────────────────────────────────

pub struct ListThemeTasksUseCase<T: ThemeRepository, R: RoleRepository> {
    pub themes: T,
    pub roles: R,
}

impl<T: ThemeRepository, R: RoleRepository> ListThemeTasksUseCase<T, R> {
    pub async fn execute(&self, theme_id: i32, viewer: Option<Uuid>) -> Result<Vec<Task>, ApiError> {
        let privileged = is_teacher_or_admin(&self.roles, viewer).await?;
        let theme = self
            .themes
            .find_by_id(theme_id)
            .await?
            .ok_or(ApiError::ThemeNotFound(theme_id))?;
        if theme.is_disabled && !privileged {
            return Err(ApiError::ThemeNotFound(theme_id));
        }
        self.themes.list_tasks(theme_id, privileged).await
    }
}
