use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{NewTask, NewTaskTest, Task, TaskTest, TestResult, TestRunSummary};
use crate::error::ApiError;
use crate::extract::{Identity, MaybeIdentity};
use crate::handlers::require_teacher_or_admin;
use crate::state::AppState;
use crate::usecase::grade::{ExecuteTaskInput, ExecuteTaskUseCase, GetTestResultsUseCase};
use crate::usecase::task::{
    CreateTaskUseCase, DeleteTaskUseCase, GetTaskUseCase, UpdateTaskUseCase,
};

const DEFAULT_LANGUAGE: &str = "python";
const DEFAULT_VERSION: &str = "3.10.0";

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TaskTestResponse {
    pub id: i32,
    pub input: String,
    pub output: String,
}

impl From<TaskTest> for TaskTestResponse {
    fn from(test: TaskTest) -> Self {
        Self {
            id: test.id,
            input: test.input,
            output: test.expected_output,
        }
    }
}

#[derive(Serialize)]
pub struct TaskResponse {
    pub id: i32,
    pub theme_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub language: String,
    pub version: String,
    pub run_timeout: i32,
    pub run_memory_limit: i32,
    pub compile_timeout: i32,
    pub compile_memory_limit: i32,
    pub is_disabled: bool,
    pub tests: Vec<TaskTestResponse>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            theme_id: task.theme_id,
            name: task.name,
            description: task.description,
            language: task.language,
            version: task.version,
            run_timeout: task.run_timeout,
            run_memory_limit: task.run_memory_limit,
            compile_timeout: task.compile_timeout,
            compile_memory_limit: task.compile_memory_limit,
            is_disabled: task.is_disabled,
            tests: task.tests.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct TestResultResponse {
    pub task_test_id: i32,
    pub passed: bool,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub executed_at: chrono::DateTime<chrono::Utc>,
}

impl From<TestResult> for TestResultResponse {
    fn from(result: TestResult) -> Self {
        Self {
            task_test_id: result.task_test_id,
            passed: result.passed,
            executed_at: result.executed_at,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TaskTestRequest {
    pub input: String,
    pub output: String,
}

#[derive(Deserialize)]
pub struct TaskRequest {
    pub theme_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub version: Option<String>,
    pub run_timeout: i32,
    pub run_memory_limit: i32,
    pub compile_timeout: i32,
    pub compile_memory_limit: i32,
    #[serde(default)]
    pub is_disabled: bool,
    pub tests: Vec<TaskTestRequest>,
}

impl From<TaskRequest> for NewTask {
    fn from(body: TaskRequest) -> Self {
        NewTask {
            theme_id: body.theme_id,
            name: body.name,
            description: body.description,
            language: body.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
            version: body.version.unwrap_or_else(|| DEFAULT_VERSION.to_owned()),
            run_timeout: body.run_timeout,
            run_memory_limit: body.run_memory_limit,
            compile_timeout: body.compile_timeout,
            compile_memory_limit: body.compile_memory_limit,
            is_disabled: body.is_disabled,
            tests: body
                .tests
                .into_iter()
                .map(|t| NewTaskTest {
                    input: t.input,
                    expected_output: t.output,
                })
                .collect(),
        }
    }
}

// ── POST /api/learning/task ──────────────────────────────────────────────────

pub async fn create_task(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<TaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = CreateTaskUseCase {
        tasks: state.task_repo(),
    };
    let task = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

// ── GET /api/learning/task/{id} ──────────────────────────────────────────────

pub async fn get_task(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TaskResponse>, ApiError> {
    let usecase = GetTaskUseCase {
        tasks: state.task_repo(),
        roles: state.role_repo(),
    };
    let task = usecase.execute(id, identity.map(|i| i.user_id)).await?;
    Ok(Json(task.into()))
}

// ── PUT /api/learning/task/{id} ──────────────────────────────────────────────

pub async fn update_task(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<TaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = UpdateTaskUseCase {
        tasks: state.task_repo(),
    };
    let task = usecase.execute(id, body.into()).await?;
    Ok(Json(task.into()))
}

// ── DELETE /api/learning/task/{id} ───────────────────────────────────────────

pub async fn delete_task(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require_teacher_or_admin(&state, identity.user_id).await?;
    let usecase = DeleteTaskUseCase {
        tasks: state.task_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/learning/task/{user_id}/{task_id} ───────────────────────────────

pub async fn get_test_results(
    _identity: Identity,
    State(state): State<AppState>,
    Path((user_id, task_id)): Path<(Uuid, i32)>,
) -> Result<Json<Vec<TestResultResponse>>, ApiError> {
    let usecase = GetTestResultsUseCase {
        results: state.test_result_repo(),
    };
    let results = usecase.execute(user_id, task_id).await?;
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

// ── POST /api/learning/task/execute ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ExecuteTaskRequest {
    pub task_id: i32,
    pub code: String,
}

pub async fn execute_task(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ExecuteTaskRequest>,
) -> Result<Json<TestRunSummary>, ApiError> {
    let usecase = ExecuteTaskUseCase {
        tasks: state.task_repo(),
        results: state.test_result_repo(),
        executor: state.executor.clone(),
    };
    let summary = usecase
        .execute(
            identity.user_id,
            ExecuteTaskInput {
                task_id: body.task_id,
                code: body.code,
            },
        )
        .await?;
    Ok(Json(summary))
}
