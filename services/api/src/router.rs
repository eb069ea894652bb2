use axum::{
    Router,
    http::StatusCode,
    routing::{delete, get, post, put},
};
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    auth::{check_auth, logout, refresh_tokens, yandex_auth, yandex_callback},
    course::{
        create_course, delete_course, get_course, list_course_themes, list_courses, update_course,
    },
    task::{create_task, delete_task, execute_task, get_task, get_test_results, update_task},
    theme::{create_theme, delete_theme, get_theme, list_theme_tasks, list_themes, update_theme},
    user::{delete_user, get_me, get_my_role, get_user, get_user_role, update_user},
};
use crate::state::AppState;

/// Handler for `GET /healthz`, the liveness check.
async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`, the readiness check.
async fn readyz() -> StatusCode {
    StatusCode::OK
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/yandex", get(yandex_auth))
        .route("/api/auth/yandex/callback", get(yandex_callback))
        .route("/api/auth/refresh-tokens", get(refresh_tokens))
        .route("/api/auth/logout", get(logout))
        .route("/api/auth/check-auth", get(check_auth))
        // User directory
        .route("/api/user", get(get_me))
        .route("/api/user", put(update_user))
        .route("/api/user/role", get(get_my_role))
        .route("/api/user/{id}", get(get_user))
        .route("/api/user/{id}", delete(delete_user))
        .route("/api/user/{id}/role", get(get_user_role))
        // Courses
        .route("/api/learning/course", get(list_courses))
        .route("/api/learning/course", post(create_course))
        .route("/api/learning/course/{id}", get(get_course))
        .route("/api/learning/course/{id}", put(update_course))
        .route("/api/learning/course/{id}", delete(delete_course))
        .route("/api/learning/course/{id}/themes", get(list_course_themes))
        // Themes
        .route("/api/learning/theme", get(list_themes))
        .route("/api/learning/theme", post(create_theme))
        .route("/api/learning/theme/{id}", get(get_theme))
        .route("/api/learning/theme/{id}", put(update_theme))
        .route("/api/learning/theme/{id}", delete(delete_theme))
        .route("/api/learning/theme/{id}/tasks", get(list_theme_tasks))
        // Tasks and grading
        .route("/api/learning/task", post(create_task))
        .route("/api/learning/task/execute", post(execute_task))
        .route("/api/learning/task/{id}", get(get_task))
        .route("/api/learning/task/{id}", put(update_task))
        .route("/api/learning/task/{id}", delete(delete_task))
        .route(
            "/api/learning/task/{user_id}/{task_id}",
            get(get_test_results),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
