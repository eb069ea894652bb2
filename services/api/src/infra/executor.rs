use std::time::Duration;

use crate::domain::repository::ExecutorPort;
use crate::domain::types::{ExecutionRequest, ExecutionResponse};
use crate::error::ApiError;

/// Client for the sandboxed code-execution service.
///
/// Every call carries a bounded timeout; the grading usecase records a
/// timed-out test as failed instead of hanging the whole run.
#[derive(Clone)]
pub struct ExecutorClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ExecutorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
        }
    }
}

impl ExecutorPort for ExecutorClient {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/v2/execute", self.base_url))
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "execution request failed");
                ApiError::BadGateway
            })?
            .error_for_status()
            .map_err(|e| {
                tracing::warn!(error = %e, "execution service returned error status");
                ApiError::BadGateway
            })?;

        response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "execution response unreadable");
            ApiError::BadGateway
        })
    }
}
