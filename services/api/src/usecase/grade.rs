use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{ExecutorPort, TaskRepository, TestResultRepository};
use crate::domain::types::{
    ExecutionFile, ExecutionRequest, Task, TestResult, TestRunSummary,
};
use crate::error::ApiError;

// ── ExecuteTask ──────────────────────────────────────────────────────────────

pub struct ExecuteTaskInput {
    pub task_id: i32,
    pub code: String,
}

/// Grade a submission: run every test case against the execution service
/// concurrently, record per-test outcomes and report the aggregate.
pub struct ExecuteTaskUseCase<T: TaskRepository, R: TestResultRepository, E: ExecutorPort> {
    pub tasks: T,
    pub results: R,
    pub executor: E,
}

impl<T: TaskRepository, R: TestResultRepository, E: ExecutorPort> ExecuteTaskUseCase<T, R, E> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: ExecuteTaskInput,
    ) -> Result<TestRunSummary, ApiError> {
        if input.code.trim().is_empty() {
            return Err(ApiError::EmptySubmission);
        }

        let task = self
            .tasks
            .find_by_id(input.task_id)
            .await?
            .ok_or(ApiError::TaskNotFound(input.task_id))?;

        let executed_at = Utc::now();
        let task_id = task.id;
        let runs = task.tests.iter().map(|test| {
            let request = execution_request(&task, &input.code, &test.input);
            async move {
                // A transport failure or timeout on one test is that test
                // failing, never the whole run aborting.
                let passed = match self.executor.execute(&request).await {
                    Ok(response) => response.passes(&test.expected_output),
                    Err(e) => {
                        tracing::warn!(
                            task_id,
                            task_test_id = test.id,
                            error = %e,
                            "test execution failed"
                        );
                        false
                    }
                };
                TestResult {
                    id: Uuid::now_v7(),
                    user_id,
                    task_id,
                    task_test_id: test.id,
                    passed,
                    executed_at,
                }
            }
        });
        let results = futures::future::join_all(runs).await;

        self.results.record(&results).await?;

        let passed_tests = results.iter().filter(|r| r.passed).count() as u32;
        Ok(TestRunSummary {
            task_id,
            passed_tests,
            total_tests: results.len() as u32,
            executed_at,
        })
    }
}

fn execution_request(task: &Task, code: &str, stdin: &str) -> ExecutionRequest {
    ExecutionRequest {
        language: task.language.clone(),
        version: task.version.clone(),
        files: vec![ExecutionFile {
            name: "main".to_owned(),
            content: code.to_owned(),
        }],
        stdin: stdin.to_owned(),
        compile_timeout: task.compile_timeout,
        run_timeout: task.run_timeout,
        compile_memory_limit: task.compile_memory_limit,
        run_memory_limit: task.run_memory_limit,
    }
}

// ── GetTestResults ───────────────────────────────────────────────────────────

pub struct GetTestResultsUseCase<R: TestResultRepository> {
    pub results: R,
}

impl<R: TestResultRepository> GetTestResultsUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        task_id: i32,
    ) -> Result<Vec<TestResult>, ApiError> {
        self.results.list_by_user_task(user_id, task_id).await
    }
}
