use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::cookie::{REFRESH_TOKEN, clear_refresh_token_cookie, set_refresh_token_cookie};
use crate::error::ApiError;
use crate::handlers::user_agent;
use crate::state::AppState;
use crate::usecase::oauth::{AuthenticateProviderUserInput, AuthenticateProviderUserUseCase};
use crate::usecase::token::{
    CheckAuthOutcome, CheckAuthUseCase, LogoutUseCase, RefreshTokensUseCase,
};

#[derive(Serialize)]
pub struct TokensResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

// ── GET /api/auth/yandex ─────────────────────────────────────────────────────

pub async fn yandex_auth(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.yandex.authorize_url())
}

// ── GET /api/auth/yandex/callback ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct YandexCallbackQuery {
    pub code: String,
}

pub async fn yandex_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(query): Query<YandexCallbackQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let provider_token = state.yandex.exchange_code(&query.code).await?;

    let usecase = AuthenticateProviderUserUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
        provider_types: state.provider_type_repo(),
        providers: state.provider_repo(),
        provider_tokens: state.provider_token_repo(),
        refresh_tokens: state.refresh_token_repo(),
        sessions: state.session_repo(),
        idp: state.yandex.clone(),
        jwt_secret: state.jwt_secret.clone(),
        access_token_ttl_secs: state.access_token_ttl_secs,
    };
    let pair = usecase
        .execute(AuthenticateProviderUserInput {
            provider_token,
            user_agent: user_agent(&headers),
        })
        .await?;

    let jar = set_refresh_token_cookie(
        jar,
        pair.refresh.token,
        pair.refresh.expires_at,
        state.cookie_secure,
    );
    Ok((jar, Redirect::to(&state.frontend_url)))
}

// ── GET /api/auth/refresh-tokens ─────────────────────────────────────────────

pub async fn refresh_tokens(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_value = jar
        .get(REFRESH_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(ApiError::Unauthorized)?;

    let usecase = RefreshTokensUseCase {
        refresh_tokens: state.refresh_token_repo(),
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
        access_token_ttl_secs: state.access_token_ttl_secs,
    };
    let pair = usecase.execute(&refresh_value, &user_agent(&headers)).await?;

    let jar = set_refresh_token_cookie(
        jar,
        pair.refresh.token,
        pair.refresh.expires_at,
        state.cookie_secure,
    );
    Ok((
        StatusCode::CREATED,
        jar,
        Json(TokensResponse {
            access_token: pair.access_token,
        }),
    ))
}

// ── GET /api/auth/logout ─────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    // A missing or unknown token is still a successful logout.
    if let Some(cookie) = jar.get(REFRESH_TOKEN) {
        let usecase = LogoutUseCase {
            refresh_tokens: state.refresh_token_repo(),
        };
        usecase.execute(cookie.value()).await?;
    }
    let jar = clear_refresh_token_cookie(jar, state.cookie_secure);
    Ok((StatusCode::OK, jar))
}

// ── GET /api/auth/check-auth ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckAuthResponse {
    pub status: bool,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

pub async fn check_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Json<CheckAuthResponse>, ApiError> {
    let access_token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::MissingData)?;
    let refresh_value = jar.get(REFRESH_TOKEN).map(|c| c.value().to_owned());

    let usecase = CheckAuthUseCase {
        refresh_tokens: state.refresh_token_repo(),
        jwt_secret: state.jwt_secret.clone(),
        access_token_ttl_secs: state.access_token_ttl_secs,
    };
    let response = match usecase.execute(access_token, refresh_value.as_deref()).await? {
        CheckAuthOutcome::Valid => CheckAuthResponse {
            status: true,
            access_token: None,
        },
        CheckAuthOutcome::Renewed(token) => CheckAuthResponse {
            status: true,
            access_token: Some(token),
        },
    };
    Ok(Json(response))
}
