use sea_orm::DatabaseConnection;

use crate::infra::cache::MokaUserCache;
use crate::infra::db::{
    DbCourseRepository, DbProviderRepository, DbProviderTokenRepository,
    DbProviderTypeRepository, DbRefreshTokenRepository, DbRoleRepository, DbSessionRepository,
    DbTaskRepository, DbTestResultRepository, DbThemeRepository, DbUserRepository,
};
use crate::infra::executor::ExecutorClient;
use crate::infra::yandex::YandexClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub user_cache: MokaUserCache,
    pub yandex: YandexClient,
    pub executor: ExecutorClient,
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
    pub frontend_url: String,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn provider_type_repo(&self) -> DbProviderTypeRepository {
        DbProviderTypeRepository {
            db: self.db.clone(),
        }
    }

    pub fn provider_repo(&self) -> DbProviderRepository {
        DbProviderRepository {
            db: self.db.clone(),
        }
    }

    pub fn provider_token_repo(&self) -> DbProviderTokenRepository {
        DbProviderTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn refresh_token_repo(&self) -> DbRefreshTokenRepository {
        DbRefreshTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn theme_repo(&self) -> DbThemeRepository {
        DbThemeRepository {
            db: self.db.clone(),
        }
    }

    pub fn task_repo(&self) -> DbTaskRepository {
        DbTaskRepository {
            db: self.db.clone(),
        }
    }

    pub fn test_result_repo(&self) -> DbTestResultRepository {
        DbTestResultRepository {
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State with a disconnected database, for extractor-level tests.
    pub fn for_tests(jwt_secret: &str) -> Self {
        let config = crate::config::ApiConfig {
            database_url: String::new(),
            jwt_secret: jwt_secret.to_owned(),
            access_token_ttl_secs: 3600,
            api_port: 0,
            frontend_url: "http://localhost:3000".to_owned(),
            yandex_client_id: "client-id".to_owned(),
            yandex_client_secret: "client-secret".to_owned(),
            yandex_callback_url: "http://localhost:3000/api/auth/yandex/callback".to_owned(),
            yandex_oauth_url: "https://oauth.yandex.ru".to_owned(),
            yandex_info_url: "https://login.yandex.ru".to_owned(),
            executor_url: "http://localhost:2000".to_owned(),
            executor_timeout_secs: 1,
            user_cache_ttl_secs: 60,
            cookie_secure: false,
        };
        Self {
            db: DatabaseConnection::default(),
            user_cache: MokaUserCache::new(std::time::Duration::from_secs(60)),
            yandex: YandexClient::new(&config),
            executor: ExecutorClient::new(
                &config.executor_url,
                std::time::Duration::from_secs(config.executor_timeout_secs),
            ),
            jwt_secret: config.jwt_secret,
            access_token_ttl_secs: config.access_token_ttl_secs,
            frontend_url: config.frontend_url,
            cookie_secure: config.cookie_secure,
        }
    }
}
