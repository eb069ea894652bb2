/// API service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds (default 3600). Env var: `ACCESS_TOKEN_TTL_SECS`.
    pub access_token_ttl_secs: u64,
    /// TCP port to listen on (default 3000). Env var: `API_PORT`.
    pub api_port: u16,
    /// Frontend URL the OAuth callback redirects to.
    pub frontend_url: String,
    /// Yandex OAuth application id.
    pub yandex_client_id: String,
    /// Yandex OAuth application secret.
    pub yandex_client_secret: String,
    /// Redirect URI registered with Yandex.
    pub yandex_callback_url: String,
    /// Yandex OAuth endpoint base (default "https://oauth.yandex.ru").
    pub yandex_oauth_url: String,
    /// Yandex user-info endpoint base (default "https://login.yandex.ru").
    pub yandex_info_url: String,
    /// Code-execution service base URL.
    pub executor_url: String,
    /// Per-call timeout for the code-execution service in seconds (default 15).
    pub executor_timeout_secs: u64,
    /// User directory cache TTL in seconds (default 3600).
    pub user_cache_ttl_secs: u64,
    /// `Secure` attribute on the refresh cookie; on when `APP_ENV=production`.
    pub cookie_secure: bool,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            access_token_ttl_secs: std::env::var("ACCESS_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            frontend_url: std::env::var("FRONTEND_URL").expect("FRONTEND_URL"),
            yandex_client_id: std::env::var("YANDEX_CLIENT_ID").expect("YANDEX_CLIENT_ID"),
            yandex_client_secret: std::env::var("YANDEX_CLIENT_SECRET")
                .expect("YANDEX_CLIENT_SECRET"),
            yandex_callback_url: std::env::var("YANDEX_CALLBACK_URL")
                .expect("YANDEX_CALLBACK_URL"),
            yandex_oauth_url: std::env::var("YANDEX_OAUTH_URL")
                .unwrap_or_else(|_| "https://oauth.yandex.ru".to_owned()),
            yandex_info_url: std::env::var("YANDEX_INFO_URL")
                .unwrap_or_else(|_| "https://login.yandex.ru".to_owned()),
            executor_url: std::env::var("EXECUTOR_URL").expect("EXECUTOR_URL"),
            executor_timeout_secs: std::env::var("EXECUTOR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            user_cache_ttl_secs: std::env::var("USER_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            cookie_secure: std::env::var("APP_ENV")
                .map(|v| v == "production")
                .unwrap_or(false),
        }
    }
}
