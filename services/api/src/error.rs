use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("user {0} not found")]
    UserNotFound(String),
    #[error("course {0} not found")]
    CourseNotFound(i32),
    #[error("theme {0} not found")]
    ThemeNotFound(i32),
    #[error("task {0} not found")]
    TaskNotFound(i32),
    #[error("submission code is empty")]
    EmptySubmission,
    #[error("missing data")]
    MissingData,
    #[error("identity provider error")]
    BadGateway,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::CourseNotFound(_) => "COURSE_NOT_FOUND",
            Self::ThemeNotFound(_) => "THEME_NOT_FOUND",
            Self::TaskNotFound(_) => "TASK_NOT_FOUND",
            Self::EmptySubmission => "EMPTY_SUBMISSION",
            Self::MissingData => "MISSING_DATA",
            Self::BadGateway => "BAD_GATEWAY",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound(_)
            | Self::CourseNotFound(_)
            | Self::ThemeNotFound(_)
            | Self::TaskNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptySubmission | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::BadGateway => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only. The trace layer already records method/uri/status
        // for every request, and 4xx are expected client errors.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
