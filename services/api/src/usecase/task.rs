use uuid::Uuid;

use crate::domain::repository::{RoleRepository, TaskRepository};
use crate::domain::types::{NewTask, Task};
use crate::error::ApiError;
use crate::usecase::role::is_teacher_or_admin;

// ── GetTask ──────────────────────────────────────────────────────────────────

pub struct GetTaskUseCase<T: TaskRepository, R: RoleRepository> {
    pub tasks: T,
    pub roles: R,
}

impl<T: TaskRepository, R: RoleRepository> GetTaskUseCase<T, R> {
    pub async fn execute(&self, id: i32, viewer: Option<Uuid>) -> Result<Task, ApiError> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TaskNotFound(id))?;
        if task.is_disabled && !is_teacher_or_admin(&self.roles, viewer).await? {
            return Err(ApiError::TaskNotFound(id));
        }
        Ok(task)
    }
}

// ── CreateTask ───────────────────────────────────────────────────────────────

pub struct CreateTaskUseCase<T: TaskRepository> {
    pub tasks: T,
}

impl<T: TaskRepository> CreateTaskUseCase<T> {
    pub async fn execute(&self, input: NewTask) -> Result<Task, ApiError> {
        self.tasks.create(&input).await
    }
}

// ── UpdateTask ───────────────────────────────────────────────────────────────

pub struct UpdateTaskUseCase<T: TaskRepository> {
    pub tasks: T,
}

impl<T: TaskRepository> UpdateTaskUseCase<T> {
    /// Full replacement: task fields are overwritten and the test set is
    /// recreated from the input.
    pub async fn execute(&self, id: i32, input: NewTask) -> Result<Task, ApiError> {
        self.tasks
            .update(id, &input)
            .await?
            .ok_or(ApiError::TaskNotFound(id))
    }
}

// ── DeleteTask ───────────────────────────────────────────────────────────────

pub struct DeleteTaskUseCase<T: TaskRepository> {
    pub tasks: T,
}

impl<T: TaskRepository> DeleteTaskUseCase<T> {
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        if !self.tasks.delete(id).await? {
            return Err(ApiError::TaskNotFound(id));
        }
        Ok(())
    }
}
