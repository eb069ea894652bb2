use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Refresh token lifetime: 30 days from issuance.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

// ── Closed enums backed by seeded catalog tables ─────────────────────────────

/// User permission level. Wire format is the upper-case name, matching the
/// seeded `roles` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Teacher,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::User, UserRole::Teacher, UserRole::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Teacher => "TEACHER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parse a persisted role name. Returns `None` for names outside the
    /// closed set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "USER" => Some(Self::User),
            "TEACHER" => Some(Self::Teacher),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Privileged roles see disabled courses/themes/tasks and may edit them.
    pub fn is_teacher_or_admin(self) -> bool {
        matches!(self, Self::Teacher | Self::Admin)
    }
}

/// External identity provider. Currently only Yandex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yandex,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 1] = [ProviderKind::Yandex];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yandex => "YANDEX",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "YANDEX" => Some(Self::Yandex),
            _ => None,
        }
    }
}

// ── Account / auth records ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Role {
    pub id: Uuid,
    pub name: UserRole,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub nick_name: Option<String>,
    pub display_name: Option<String>,
    pub is_blocked: bool,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProviderType {
    pub id: Uuid,
    pub kind: ProviderKind,
}

/// Link between a local user and one provider-side identity.
#[derive(Debug, Clone)]
pub struct Provider {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider_type_id: Uuid,
    pub provider_user_id: String,
}

/// Cached copy of the last token received from the provider.
#[derive(Debug, Clone)]
pub struct ProviderToken {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub provider_type_id: Uuid,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// Server-side refresh token bound to the issuing user-agent.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub user_agent: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// One OAuth login event: provider token → refresh token it produced.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub provider_token_id: Uuid,
    pub refresh_token_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Result of issuing or rotating credentials.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh: RefreshToken,
}

// ── Learning records ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub id: i32,
    pub course_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
}

#[derive(Debug, Clone)]
pub struct NewTheme {
    pub course_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
}

#[derive(Debug, Clone)]
pub struct Task {
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
    pub tests: Vec<TaskTest>,
}

#[derive(Debug, Clone)]
pub struct TaskTest {
    pub id: i32,
    pub task_id: i32,
    pub input: String,
    pub expected_output: String,
}

#[derive(Debug, Clone)]
pub struct NewTask {
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
    pub tests: Vec<NewTaskTest>,
}

#[derive(Debug, Clone)]
pub struct NewTaskTest {
    pub input: String,
    pub expected_output: String,
}

// ── Grading ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TestResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_id: i32,
    pub task_test_id: i32,
    pub passed: bool,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestRunSummary {
    pub task_id: i32,
    pub passed_tests: u32,
    pub total_tests: u32,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub executed_at: DateTime<Utc>,
}

/// Request body for the code-execution service.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionRequest {
    pub language: String,
    pub version: String,
    pub files: Vec<ExecutionFile>,
    pub stdin: String,
    pub compile_timeout: i32,
    pub run_timeout: i32,
    pub compile_memory_limit: i32,
    pub run_memory_limit: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionFile {
    pub name: String,
    pub content: String,
}

/// Response from the code-execution service.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionResponse {
    pub run: ProcessOutput,
    #[serde(default)]
    pub compile: Option<ProcessOutput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessOutput {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub output: String,
    pub code: Option<i32>,
    pub signal: Option<String>,
}

impl ExecutionResponse {
    /// A test passes iff the run exited 0 and its trimmed output equals the
    /// expected output.
    pub fn passes(&self, expected_output: &str) -> bool {
        self.run.code == Some(0) && self.run.output.trim() == expected_output
    }
}
