#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{
    Course, ExecutionRequest, ExecutionResponse, NewCourse, NewTask, NewTheme, Provider,
    ProviderKind, ProviderToken, ProviderType, RefreshToken, Role, Session, Task, TestResult,
    Theme, User, UserRole,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_nick_name(&self, nick_name: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    async fn update(&self, user: &User) -> Result<(), ApiError>;
    /// Delete a user. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for the seeded role catalog.
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: UserRole) -> Result<Option<Role>, ApiError>;
    async fn create(&self, role: &Role) -> Result<(), ApiError>;
    /// Resolve the role a user currently holds.
    async fn role_of_user(&self, user_id: Uuid) -> Result<Option<Role>, ApiError>;
}

/// Repository for the seeded identity-provider catalog.
pub trait ProviderTypeRepository: Send + Sync {
    async fn find_by_kind(&self, kind: ProviderKind) -> Result<Option<ProviderType>, ApiError>;
    async fn create(&self, provider_type: &ProviderType) -> Result<(), ApiError>;
}

/// Repository for user ↔ external-identity links.
pub trait ProviderRepository: Send + Sync {
    async fn find_by_provider_user(
        &self,
        provider_user_id: &str,
        provider_type_id: Uuid,
    ) -> Result<Option<Provider>, ApiError>;
    async fn create(&self, provider: &Provider) -> Result<(), ApiError>;
}

/// Repository for provider-issued token values.
pub trait ProviderTokenRepository: Send + Sync {
    async fn find_by_value(&self, token: &str) -> Result<Option<ProviderToken>, ApiError>;
    async fn create(&self, token: &ProviderToken) -> Result<(), ApiError>;
}

/// Repository for server-side refresh tokens.
pub trait RefreshTokenRepository: Send + Sync {
    async fn find_by_value(&self, token: &str) -> Result<Option<RefreshToken>, ApiError>;
    async fn find_by_user_agent(
        &self,
        user_id: Uuid,
        user_agent: &str,
    ) -> Result<Option<RefreshToken>, ApiError>;
    async fn create(&self, token: &RefreshToken) -> Result<(), ApiError>;

    /// Reissue an existing row in place (login path). The row id is stable so
    /// any session pointing at it stays attached.
    async fn renew(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError>;

    /// Rotate conditionally on the literal old value (refresh path). Returns
    /// `false` when the value was already spent by a concurrent caller.
    async fn rotate(
        &self,
        old_value: &str,
        new_value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, ApiError>;

    /// Delete by literal value. Returns `true` if a row was deleted.
    async fn delete_by_value(&self, token: &str) -> Result<bool, ApiError>;
}

/// Repository for OAuth login sessions.
pub trait SessionRepository: Send + Sync {
    async fn find_by_provider_token(
        &self,
        provider_token_id: Uuid,
    ) -> Result<Option<Session>, ApiError>;
    async fn create(&self, session: &Session) -> Result<(), ApiError>;
    /// Repair the refresh-token pointer after a re-login issued a new row.
    async fn update_refresh_token(&self, id: Uuid, refresh_token_id: Uuid)
    -> Result<(), ApiError>;
}

/// Repository for courses.
pub trait CourseRepository: Send + Sync {
    async fn list(&self, include_disabled: bool) -> Result<Vec<Course>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, ApiError>;
    async fn create(&self, course: &NewCourse) -> Result<Course, ApiError>;
    async fn update(&self, course: &Course) -> Result<(), ApiError>;
    /// Delete a course and all of its themes, tasks, tests and results in one
    /// transaction. Returns `true` if the course existed.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
    async fn list_themes(
        &self,
        course_id: i32,
        include_disabled: bool,
    ) -> Result<Vec<Theme>, ApiError>;
}

/// Repository for themes.
pub trait ThemeRepository: Send + Sync {
    async fn list(&self, include_disabled: bool) -> Result<Vec<Theme>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Theme>, ApiError>;
    async fn create(&self, theme: &NewTheme) -> Result<Theme, ApiError>;
    async fn update(&self, theme: &Theme) -> Result<(), ApiError>;
    /// Delete a theme and its tasks/tests/results in one transaction.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
    async fn list_tasks(
        &self,
        theme_id: i32,
        include_disabled: bool,
    ) -> Result<Vec<Task>, ApiError>;
}

/// Repository for tasks and their test sets.
pub trait TaskRepository: Send + Sync {
    /// Fetch a task together with its tests.
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, ApiError>;
    /// Insert the task and its tests in one transaction.
    async fn create(&self, task: &NewTask) -> Result<Task, ApiError>;
    /// Update the task and replace its test set in one transaction.
    /// Returns `None` when the task does not exist.
    async fn update(&self, id: i32, task: &NewTask) -> Result<Option<Task>, ApiError>;
    /// Delete a task with its tests and recorded results in one transaction.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Repository for recorded grading outcomes.
pub trait TestResultRepository: Send + Sync {
    async fn record(&self, results: &[TestResult]) -> Result<(), ApiError>;
    /// Recorded results for one user on one task, newest first.
    async fn list_by_user_task(
        &self,
        user_id: Uuid,
        task_id: i32,
    ) -> Result<Vec<TestResult>, ApiError>;
}

/// Read-through cache for the user directory. Keys are the lookup identifier
/// (id string or nick name); invalidation covers both keys of a user.
pub trait UserCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<User>;
    async fn put(&self, key: &str, user: &User);
    async fn invalidate(&self, user: &User);
}

/// Port to the external identity provider's user-info endpoint.
pub trait IdentityProviderPort: Send + Sync {
    /// Resolve the provider-side user id for an access token.
    /// Fails with `BadGateway` when the response carries no id.
    async fn fetch_user_id(&self, access_token: &str) -> Result<String, ApiError>;
}

/// Port to the sandboxed code-execution service.
pub trait ExecutorPort: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResponse, ApiError>;
}
