use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
    sea_query::{Expr, Query},
};
use uuid::Uuid;

use praxis_api_schema::{
    courses, provider_tokens, provider_types, providers, refresh_tokens, roles, sessions,
    task_tests, tasks, test_results, themes, users,
};

use crate::domain::repository::{
    CourseRepository, ProviderRepository, ProviderTokenRepository, ProviderTypeRepository,
    RefreshTokenRepository, RoleRepository, SessionRepository, TaskRepository,
    TestResultRepository, ThemeRepository, UserRepository,
};
use crate::domain::types::{
    Course, NewCourse, NewTask, NewTheme, Provider, ProviderKind, ProviderToken, ProviderType,
    RefreshToken, Role, Session, Task, TaskTest, TestResult, Theme, User, UserRole,
};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_nick_name(&self, nick_name: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::NickName.eq(nick_name))
            .one(&self.db)
            .await
            .context("find user by nick name")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            nick_name: Set(user.nick_name.clone()),
            display_name: Set(user.display_name.clone()),
            is_blocked: Set(user.is_blocked),
            role_id: Set(user.role_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            nick_name: Set(user.nick_name.clone()),
            display_name: Set(user.display_name.clone()),
            is_blocked: Set(user.is_blocked),
            role_id: Set(user.role_id),
            updated_at: Set(user.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = users::Entity::delete_many()
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        nick_name: model.nick_name,
        display_name: model.display_name,
        is_blocked: model.is_blocked,
        role_id: model.role_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn find_by_name(&self, name: UserRole) -> Result<Option<Role>, ApiError> {
        let model = roles::Entity::find()
            .filter(roles::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await
            .context("find role by name")?;
        model.map(role_from_model).transpose()
    }

    async fn create(&self, role: &Role) -> Result<(), ApiError> {
        roles::ActiveModel {
            id: Set(role.id),
            name: Set(role.name.as_str().to_owned()),
        }
        .insert(&self.db)
        .await
        .context("create role")?;
        Ok(())
    }

    async fn role_of_user(&self, user_id: Uuid) -> Result<Option<Role>, ApiError> {
        let result = users::Entity::find_by_id(user_id)
            .find_also_related(roles::Entity)
            .one(&self.db)
            .await
            .context("find user role")?;
        match result {
            Some((_user, Some(role))) => role_from_model(role).map(Some),
            _ => Ok(None),
        }
    }
}

fn role_from_model(model: roles::Model) -> Result<Role, ApiError> {
    let name = UserRole::from_name(&model.name)
        .ok_or_else(|| anyhow::anyhow!("role {} outside the closed set", model.name))?;
    Ok(Role { id: model.id, name })
}

// ── Provider type repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProviderTypeRepository {
    pub db: DatabaseConnection,
}

impl ProviderTypeRepository for DbProviderTypeRepository {
    async fn find_by_kind(&self, kind: ProviderKind) -> Result<Option<ProviderType>, ApiError> {
        let model = provider_types::Entity::find()
            .filter(provider_types::Column::Name.eq(kind.as_str()))
            .one(&self.db)
            .await
            .context("find provider type")?;
        model.map(provider_type_from_model).transpose()
    }

    async fn create(&self, provider_type: &ProviderType) -> Result<(), ApiError> {
        provider_types::ActiveModel {
            id: Set(provider_type.id),
            name: Set(provider_type.kind.as_str().to_owned()),
        }
        .insert(&self.db)
        .await
        .context("create provider type")?;
        Ok(())
    }
}

fn provider_type_from_model(model: provider_types::Model) -> Result<ProviderType, ApiError> {
    let kind = ProviderKind::from_name(&model.name)
        .ok_or_else(|| anyhow::anyhow!("provider type {} outside the closed set", model.name))?;
    Ok(ProviderType { id: model.id, kind })
}

// ── Provider repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProviderRepository {
    pub db: DatabaseConnection,
}

impl ProviderRepository for DbProviderRepository {
    async fn find_by_provider_user(
        &self,
        provider_user_id: &str,
        provider_type_id: Uuid,
    ) -> Result<Option<Provider>, ApiError> {
        let model = providers::Entity::find()
            .filter(providers::Column::ProviderUserId.eq(provider_user_id))
            .filter(providers::Column::ProviderTypeId.eq(provider_type_id))
            .one(&self.db)
            .await
            .context("find provider by provider user")?;
        Ok(model.map(provider_from_model))
    }

    async fn create(&self, provider: &Provider) -> Result<(), ApiError> {
        providers::ActiveModel {
            id: Set(provider.id),
            user_id: Set(provider.user_id),
            provider_type_id: Set(provider.provider_type_id),
            provider_user_id: Set(provider.provider_user_id.clone()),
        }
        .insert(&self.db)
        .await
        .context("create provider")?;
        Ok(())
    }
}

fn provider_from_model(model: providers::Model) -> Provider {
    Provider {
        id: model.id,
        user_id: model.user_id,
        provider_type_id: model.provider_type_id,
        provider_user_id: model.provider_user_id,
    }
}

// ── Provider token repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProviderTokenRepository {
    pub db: DatabaseConnection,
}

impl ProviderTokenRepository for DbProviderTokenRepository {
    async fn find_by_value(&self, token: &str) -> Result<Option<ProviderToken>, ApiError> {
        let model = provider_tokens::Entity::find()
            .filter(provider_tokens::Column::Token.eq(token))
            .one(&self.db)
            .await
            .context("find provider token")?;
        Ok(model.map(provider_token_from_model))
    }

    async fn create(&self, token: &ProviderToken) -> Result<(), ApiError> {
        provider_tokens::ActiveModel {
            id: Set(token.id),
            provider_id: Set(token.provider_id),
            provider_type_id: Set(token.provider_type_id),
            token: Set(token.token.clone()),
            created_at: Set(token.created_at),
        }
        .insert(&self.db)
        .await
        .context("create provider token")?;
        Ok(())
    }
}

fn provider_token_from_model(model: provider_tokens::Model) -> ProviderToken {
    ProviderToken {
        id: model.id,
        provider_id: model.provider_id,
        provider_type_id: model.provider_type_id,
        token: model.token,
        created_at: model.created_at,
    }
}

// ── Refresh token repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRefreshTokenRepository {
    pub db: DatabaseConnection,
}

impl RefreshTokenRepository for DbRefreshTokenRepository {
    async fn find_by_value(&self, token: &str) -> Result<Option<RefreshToken>, ApiError> {
        let model = refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::Token.eq(token))
            .one(&self.db)
            .await
            .context("find refresh token by value")?;
        Ok(model.map(refresh_token_from_model))
    }

    async fn find_by_user_agent(
        &self,
        user_id: Uuid,
        user_agent: &str,
    ) -> Result<Option<RefreshToken>, ApiError> {
        let model = refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::UserId.eq(user_id))
            .filter(refresh_tokens::Column::UserAgent.eq(user_agent))
            .one(&self.db)
            .await
            .context("find refresh token by user agent")?;
        Ok(model.map(refresh_token_from_model))
    }

    async fn create(&self, token: &RefreshToken) -> Result<(), ApiError> {
        refresh_tokens::ActiveModel {
            id: Set(token.id),
            user_id: Set(token.user_id),
            token: Set(token.token.clone()),
            user_agent: Set(token.user_agent.clone()),
            expires_at: Set(token.expires_at),
        }
        .insert(&self.db)
        .await
        .context("create refresh token")?;
        Ok(())
    }

    async fn renew(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        refresh_tokens::ActiveModel {
            id: Set(id),
            token: Set(token.to_owned()),
            expires_at: Set(expires_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("renew refresh token")?;
        Ok(())
    }

    async fn rotate(
        &self,
        old_value: &str,
        new_value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        // Single conditional UPDATE keyed on the literal value: the atomic
        // compare-and-swap that rejects a concurrently spent token.
        let result = refresh_tokens::Entity::update_many()
            .filter(refresh_tokens::Column::Token.eq(old_value))
            .col_expr(refresh_tokens::Column::Token, Expr::value(new_value))
            .col_expr(refresh_tokens::Column::ExpiresAt, Expr::value(expires_at))
            .exec(&self.db)
            .await
            .context("rotate refresh token")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_by_value(&self, token: &str) -> Result<bool, ApiError> {
        let result = refresh_tokens::Entity::delete_many()
            .filter(refresh_tokens::Column::Token.eq(token))
            .exec(&self.db)
            .await
            .context("delete refresh token")?;
        Ok(result.rows_affected > 0)
    }
}

fn refresh_token_from_model(model: refresh_tokens::Model) -> RefreshToken {
    RefreshToken {
        id: model.id,
        user_id: model.user_id,
        token: model.token,
        user_agent: model.user_agent,
        expires_at: model.expires_at,
    }
}

// ── Session repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn find_by_provider_token(
        &self,
        provider_token_id: Uuid,
    ) -> Result<Option<Session>, ApiError> {
        let model = sessions::Entity::find()
            .filter(sessions::Column::ProviderTokenId.eq(provider_token_id))
            .one(&self.db)
            .await
            .context("find session by provider token")?;
        Ok(model.map(session_from_model))
    }

    async fn create(&self, session: &Session) -> Result<(), ApiError> {
        sessions::ActiveModel {
            id: Set(session.id),
            provider_token_id: Set(session.provider_token_id),
            refresh_token_id: Set(session.refresh_token_id),
            created_at: Set(session.created_at),
        }
        .insert(&self.db)
        .await
        .context("create session")?;
        Ok(())
    }

    async fn update_refresh_token(
        &self,
        id: Uuid,
        refresh_token_id: Uuid,
    ) -> Result<(), ApiError> {
        sessions::ActiveModel {
            id: Set(id),
            refresh_token_id: Set(refresh_token_id),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update session refresh token")?;
        Ok(())
    }
}

fn session_from_model(model: sessions::Model) -> Session {
    Session {
        id: model.id,
        provider_token_id: model.provider_token_id,
        refresh_token_id: model.refresh_token_id,
        created_at: model.created_at,
    }
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn list(&self, include_disabled: bool) -> Result<Vec<Course>, ApiError> {
        let mut query = courses::Entity::find().order_by_asc(courses::Column::Id);
        if !include_disabled {
            query = query.filter(courses::Column::IsDisabled.eq(false));
        }
        let models = query.all(&self.db).await.context("list courses")?;
        Ok(models.into_iter().map(course_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Course>, ApiError> {
        let model = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        Ok(model.map(course_from_model))
    }

    async fn create(&self, course: &NewCourse) -> Result<Course, ApiError> {
        let now = Utc::now();
        let model = courses::ActiveModel {
            name: Set(course.name.clone()),
            description: Set(course.description.clone()),
            is_disabled: Set(course.is_disabled),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create course")?;
        Ok(course_from_model(model))
    }

    async fn update(&self, course: &Course) -> Result<(), ApiError> {
        courses::ActiveModel {
            id: Set(course.id),
            name: Set(course.name.clone()),
            description: Set(course.description.clone()),
            is_disabled: Set(course.is_disabled),
            updated_at: Set(course.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update course")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        // Children go first so the parent delete never leaves orphans, all
        // inside one transaction.
        let deleted = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let theme_ids = Query::select()
                        .column(themes::Column::Id)
                        .from(themes::Entity)
                        .and_where(Expr::col(themes::Column::CourseId).eq(id))
                        .to_owned();
                    let task_ids = Query::select()
                        .column(tasks::Column::Id)
                        .from(tasks::Entity)
                        .and_where(
                            Expr::col(tasks::Column::ThemeId).in_subquery(theme_ids.clone()),
                        )
                        .to_owned();

                    test_results::Entity::delete_many()
                        .filter(test_results::Column::TaskId.in_subquery(task_ids.clone()))
                        .exec(txn)
                        .await?;
                    task_tests::Entity::delete_many()
                        .filter(task_tests::Column::TaskId.in_subquery(task_ids))
                        .exec(txn)
                        .await?;
                    tasks::Entity::delete_many()
                        .filter(tasks::Column::ThemeId.in_subquery(theme_ids))
                        .exec(txn)
                        .await?;
                    themes::Entity::delete_many()
                        .filter(themes::Column::CourseId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = courses::Entity::delete_many()
                        .filter(courses::Column::Id.eq(id))
                        .exec(txn)
                        .await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete course")?;
        Ok(deleted)
    }

    async fn list_themes(
        &self,
        course_id: i32,
        include_disabled: bool,
    ) -> Result<Vec<Theme>, ApiError> {
        let mut query = themes::Entity::find()
            .filter(themes::Column::CourseId.eq(course_id))
            .order_by_asc(themes::Column::Id);
        if !include_disabled {
            query = query.filter(themes::Column::IsDisabled.eq(false));
        }
        let models = query.all(&self.db).await.context("list course themes")?;
        Ok(models.into_iter().map(theme_from_model).collect())
    }
}

fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: model.id,
        name: model.name,
        description: model.description,
        is_disabled: model.is_disabled,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Theme repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbThemeRepository {
    pub db: DatabaseConnection,
}

impl ThemeRepository for DbThemeRepository {
    async fn list(&self, include_disabled: bool) -> Result<Vec<Theme>, ApiError> {
        let mut query = themes::Entity::find().order_by_asc(themes::Column::Id);
        if !include_disabled {
            query = query.filter(themes::Column::IsDisabled.eq(false));
        }
        let models = query.all(&self.db).await.context("list themes")?;
        Ok(models.into_iter().map(theme_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Theme>, ApiError> {
        let model = themes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find theme by id")?;
        Ok(model.map(theme_from_model))
    }

    async fn create(&self, theme: &NewTheme) -> Result<Theme, ApiError> {
        let model = themes::ActiveModel {
            course_id: Set(theme.course_id),
            name: Set(theme.name.clone()),
            description: Set(theme.description.clone()),
            is_disabled: Set(theme.is_disabled),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create theme")?;
        Ok(theme_from_model(model))
    }

    async fn update(&self, theme: &Theme) -> Result<(), ApiError> {
        themes::ActiveModel {
            id: Set(theme.id),
            course_id: Set(theme.course_id),
            name: Set(theme.name.clone()),
            description: Set(theme.description.clone()),
            is_disabled: Set(theme.is_disabled),
        }
        .update(&self.db)
        .await
        .context("update theme")?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let deleted = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let task_ids = Query::select()
                        .column(tasks::Column::Id)
                        .from(tasks::Entity)
                        .and_where(Expr::col(tasks::Column::ThemeId).eq(id))
                        .to_owned();

                    test_results::Entity::delete_many()
                        .filter(test_results::Column::TaskId.in_subquery(task_ids.clone()))
                        .exec(txn)
                        .await?;
                    task_tests::Entity::delete_many()
                        .filter(task_tests::Column::TaskId.in_subquery(task_ids))
                        .exec(txn)
                        .await?;
                    tasks::Entity::delete_many()
                        .filter(tasks::Column::ThemeId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = themes::Entity::delete_many()
                        .filter(themes::Column::Id.eq(id))
                        .exec(txn)
                        .await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete theme")?;
        Ok(deleted)
    }

    async fn list_tasks(
        &self,
        theme_id: i32,
        include_disabled: bool,
    ) -> Result<Vec<Task>, ApiError> {
        let mut query = tasks::Entity::find()
            .filter(tasks::Column::ThemeId.eq(theme_id))
            .order_by_asc(tasks::Column::Id);
        if !include_disabled {
            query = query.filter(tasks::Column::IsDisabled.eq(false));
        }
        let models = query.all(&self.db).await.context("list theme tasks")?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            let tests = task_tests::Entity::find()
                .filter(task_tests::Column::TaskId.eq(model.id))
                .order_by_asc(task_tests::Column::Id)
                .all(&self.db)
                .await
                .context("list task tests")?;
            result.push(task_from_model(model, tests));
        }
        Ok(result)
    }
}

fn theme_from_model(model: themes::Model) -> Theme {
    Theme {
        id: model.id,
        course_id: model.course_id,
        name: model.name,
        description: model.description,
        is_disabled: model.is_disabled,
    }
}

// ── Task repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTaskRepository {
    pub db: DatabaseConnection,
}

impl TaskRepository for DbTaskRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, ApiError> {
        let Some(model) = tasks::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find task by id")?
        else {
            return Ok(None);
        };
        let tests = task_tests::Entity::find()
            .filter(task_tests::Column::TaskId.eq(id))
            .order_by_asc(task_tests::Column::Id)
            .all(&self.db)
            .await
            .context("find task tests")?;
        Ok(Some(task_from_model(model, tests)))
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        let task = task.clone();
        let created = self
            .db
            .transaction::<_, Task, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    let model = tasks::ActiveModel {
                        theme_id: Set(task.theme_id),
                        name: Set(task.name.clone()),
                        description: Set(task.description.clone()),
                        language: Set(task.language.clone()),
                        version: Set(task.version.clone()),
                        run_timeout: Set(task.run_timeout),
                        run_memory_limit: Set(task.run_memory_limit),
                        compile_timeout: Set(task.compile_timeout),
                        compile_memory_limit: Set(task.compile_memory_limit),
                        is_disabled: Set(task.is_disabled),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    let mut tests = Vec::with_capacity(task.tests.len());
                    for test in &task.tests {
                        let test = task_tests::ActiveModel {
                            task_id: Set(model.id),
                            input: Set(test.input.clone()),
                            expected_output: Set(test.expected_output.clone()),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                        tests.push(test);
                    }
                    Ok(task_from_model(model, tests))
                })
            })
            .await
            .context("create task")?;
        Ok(created)
    }

    async fn update(&self, id: i32, task: &NewTask) -> Result<Option<Task>, ApiError> {
        let task = task.clone();
        let updated = self
            .db
            .transaction::<_, Option<Task>, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    if tasks::Entity::find_by_id(id).one(txn).await?.is_none() {
                        return Ok(None);
                    }

                    let model = tasks::ActiveModel {
                        id: Set(id),
                        theme_id: Set(task.theme_id),
                        name: Set(task.name.clone()),
                        description: Set(task.description.clone()),
                        language: Set(task.language.clone()),
                        version: Set(task.version.clone()),
                        run_timeout: Set(task.run_timeout),
                        run_memory_limit: Set(task.run_memory_limit),
                        compile_timeout: Set(task.compile_timeout),
                        compile_memory_limit: Set(task.compile_memory_limit),
                        is_disabled: Set(task.is_disabled),
                    }
                    .update(txn)
                    .await?;

                    // The test set is replaced wholesale on every update.
                    task_tests::Entity::delete_many()
                        .filter(task_tests::Column::TaskId.eq(id))
                        .exec(txn)
                        .await?;

                    let mut tests = Vec::with_capacity(task.tests.len());
                    for test in &task.tests {
                        let test = task_tests::ActiveModel {
                            task_id: Set(id),
                            input: Set(test.input.clone()),
                            expected_output: Set(test.expected_output.clone()),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;
                        tests.push(test);
                    }
                    Ok(Some(task_from_model(model, tests)))
                })
            })
            .await
            .context("update task")?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let deleted = self
            .db
            .transaction::<_, bool, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    test_results::Entity::delete_many()
                        .filter(test_results::Column::TaskId.eq(id))
                        .exec(txn)
                        .await?;
                    task_tests::Entity::delete_many()
                        .filter(task_tests::Column::TaskId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = tasks::Entity::delete_many()
                        .filter(tasks::Column::Id.eq(id))
                        .exec(txn)
                        .await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete task")?;
        Ok(deleted)
    }
}

fn task_from_model(model: tasks::Model, tests: Vec<task_tests::Model>) -> Task {
    Task {
        id: model.id,
        theme_id: model.theme_id,
        name: model.name,
        description: model.description,
        language: model.language,
        version: model.version,
        run_timeout: model.run_timeout,
        run_memory_limit: model.run_memory_limit,
        compile_timeout: model.compile_timeout,
        compile_memory_limit: model.compile_memory_limit,
        is_disabled: model.is_disabled,
        tests: tests.into_iter().map(task_test_from_model).collect(),
    }
}

fn task_test_from_model(model: task_tests::Model) -> TaskTest {
    TaskTest {
        id: model.id,
        task_id: model.task_id,
        input: model.input,
        expected_output: model.expected_output,
    }
}

// ── Test result repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTestResultRepository {
    pub db: DatabaseConnection,
}

impl TestResultRepository for DbTestResultRepository {
    async fn record(&self, results: &[TestResult]) -> Result<(), ApiError> {
        let results = results.to_vec();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    for result in &results {
                        test_results::ActiveModel {
                            id: Set(result.id),
                            user_id: Set(result.user_id),
                            task_id: Set(result.task_id),
                            task_test_id: Set(result.task_test_id),
                            passed: Set(result.passed),
                            executed_at: Set(result.executed_at),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("record test results")?;
        Ok(())
    }

    async fn list_by_user_task(
        &self,
        user_id: Uuid,
        task_id: i32,
    ) -> Result<Vec<TestResult>, ApiError> {
        let models = test_results::Entity::find()
            .filter(test_results::Column::UserId.eq(user_id))
            .filter(test_results::Column::TaskId.eq(task_id))
            .order_by_desc(test_results::Column::ExecutedAt)
            .all(&self.db)
            .await
            .context("list test results")?;
        Ok(models.into_iter().map(test_result_from_model).collect())
    }
}

fn test_result_from_model(model: test_results::Model) -> TestResult {
    TestResult {
        id: model.id,
        user_id: model.user_id,
        task_id: model.task_id,
        task_test_id: model.task_test_id,
        passed: model.passed,
        executed_at: model.executed_at,
    }
}
