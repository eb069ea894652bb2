//! Request identity extractors.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::token::validate_access_token;

/// Authenticated identity parsed from the `Authorization: Bearer` header.
/// Rejects with 401 when the header is absent or the token does not verify.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
}

/// Optional identity: anonymous requests extract as `MaybeIdentity(None)`
/// instead of being rejected. Used by visibility-gated read endpoints.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

fn bearer_identity(parts: &Parts, jwt_secret: &str) -> Option<Identity> {
    let token = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))?;
    let info = validate_access_token(token, jwt_secret).ok()?;
    Some(Identity {
        user_id: info.user_id,
    })
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    // Values are extracted synchronously and returned from a 'static async
    // block so the future does not capture the request parts.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = bearer_identity(parts, &state.jwt_secret);
        async move { identity.ok_or(ApiError::Unauthorized) }
    }
}

impl FromRequestParts<AppState> for MaybeIdentity {
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = bearer_identity(parts, &state.jwt_secret);
        async move { Ok(Self(identity)) }
    }
}
