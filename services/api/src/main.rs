use std::time::Duration;

use sea_orm::Database;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use praxis_api::config::ApiConfig;
use praxis_api::infra::cache::MokaUserCache;
use praxis_api::infra::executor::ExecutorClient;
use praxis_api::infra::yandex::YandexClient;
use praxis_api::router::build_router;
use praxis_api::state::AppState;
use praxis_api::usecase::bootstrap::SeedCatalogsUseCase;

/// Structured JSON logs filtered via `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json())
        .try_init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        user_cache: MokaUserCache::new(Duration::from_secs(config.user_cache_ttl_secs)),
        yandex: YandexClient::new(&config),
        executor: ExecutorClient::new(
            &config.executor_url,
            Duration::from_secs(config.executor_timeout_secs),
        ),
        jwt_secret: config.jwt_secret,
        access_token_ttl_secs: config.access_token_ttl_secs,
        frontend_url: config.frontend_url,
        cookie_secure: config.cookie_secure,
        db,
    };

    let seed = SeedCatalogsUseCase {
        roles: state.role_repo(),
        provider_types: state.provider_type_repo(),
    };
    seed.execute()
        .await
        .expect("failed to seed role/provider catalogs");

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
