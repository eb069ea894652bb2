use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::types::{REFRESH_TOKEN_TTL_DAYS, RefreshToken, TokenPair};
use crate::error::ApiError;

/// Access-token claims: the canonical set is the user id and expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub exp: u64,
}

/// Refresh-token claims. `jti` is a random UUID so every rotation produces a
/// distinct literal value; the literal is what the server stores and revokes.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub jti: String,
    pub exp: u64,
}

/// Identity parsed from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub access_token_exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn validation() -> Validation {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

pub fn sign_access_token(
    user_id: Uuid,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + ttl_secs;
    let claims = AccessClaims {
        sub: user_id.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}

pub fn mint_refresh_value(
    user_id: Uuid,
    secret: &str,
    expires_at: DateTime<Utc>,
) -> Result<String, ApiError> {
    let claims = RefreshClaims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4().to_string(),
        exp: expires_at.timestamp().max(0) as u64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

/// Validate an access token and return the identity it proves.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, ApiError> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|_| ApiError::Unauthorized)?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| ApiError::Unauthorized)?;

    Ok(TokenInfo {
        user_id,
        access_token_exp: data.claims.exp,
    })
}

/// Validate a refresh token's signature and expiry. The persisted row must
/// still be checked; the signature alone proves nothing after revocation.
pub fn validate_refresh_value(token: &str, secret: &str) -> Result<RefreshClaims, ApiError> {
    decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// Issue an (access, refresh) pair for a user on one user-agent.
///
/// The refresh row is keyed by `(user_id, user_agent)`: an existing row is
/// reissued in place (value rotated, expiry extended, id stable) so any
/// session pointing at it stays attached.
pub async fn issue_token_pair<R: RefreshTokenRepository>(
    refresh_tokens: &R,
    secret: &str,
    access_token_ttl_secs: u64,
    user_id: Uuid,
    user_agent: &str,
) -> Result<TokenPair, ApiError> {
    let (access_token, _) = sign_access_token(user_id, secret, access_token_ttl_secs)?;

    let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
    let value = mint_refresh_value(user_id, secret, expires_at)?;

    let refresh = match refresh_tokens.find_by_user_agent(user_id, user_agent).await? {
        Some(existing) => {
            refresh_tokens.renew(existing.id, &value, expires_at).await?;
            RefreshToken {
                token: value,
                expires_at,
                ..existing
            }
        }
        None => {
            let token = RefreshToken {
                id: Uuid::now_v7(),
                user_id,
                token: value,
                user_agent: user_agent.to_owned(),
                expires_at,
            };
            refresh_tokens.create(&token).await?;
            token
        }
    };

    Ok(TokenPair {
        access_token,
        refresh,
    })
}

// ── RefreshTokens ────────────────────────────────────────────────────────────

pub struct RefreshTokensUseCase<R: RefreshTokenRepository, U: UserRepository> {
    pub refresh_tokens: R,
    pub users: U,
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
}

impl<R: RefreshTokenRepository, U: UserRepository> RefreshTokensUseCase<R, U> {
    pub async fn execute(
        &self,
        refresh_value: &str,
        user_agent: &str,
    ) -> Result<TokenPair, ApiError> {
        match self.rotate(refresh_value, user_agent).await {
            Err(ApiError::Internal(e)) => {
                // Persistence failures in the rotation path must not leak
                // detail to the caller.
                tracing::warn!(error = %e, "token rotation failed");
                Err(ApiError::Unauthorized)
            }
            other => other,
        }
    }

    async fn rotate(&self, refresh_value: &str, user_agent: &str) -> Result<TokenPair, ApiError> {
        let stored = self
            .refresh_tokens
            .find_by_value(refresh_value)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        if stored.is_expired() || stored.user_agent != user_agent {
            return Err(ApiError::Unauthorized);
        }

        let user = self
            .users
            .find_by_id(stored.user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        if user.is_blocked {
            return Err(ApiError::Unauthorized);
        }

        let (access_token, _) =
            sign_access_token(user.id, &self.jwt_secret, self.access_token_ttl_secs)?;
        let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
        let new_value = mint_refresh_value(user.id, &self.jwt_secret, expires_at)?;

        // Conditional swap on the literal old value: of two concurrent
        // refreshes, the loser matches zero rows and is rejected.
        let rotated = self
            .refresh_tokens
            .rotate(refresh_value, &new_value, expires_at)
            .await?;
        if !rotated {
            return Err(ApiError::Unauthorized);
        }

        Ok(TokenPair {
            access_token,
            refresh: RefreshToken {
                token: new_value,
                expires_at,
                ..stored
            },
        })
    }
}

// ── CheckAuth ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CheckAuthOutcome {
    /// The presented access token is valid as-is.
    Valid,
    /// The access token was invalid but the refresh token checked out;
    /// a fresh access token was minted without rotating the refresh token.
    Renewed(String),
}

pub struct CheckAuthUseCase<R: RefreshTokenRepository> {
    pub refresh_tokens: R,
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
}

impl<R: RefreshTokenRepository> CheckAuthUseCase<R> {
    pub async fn execute(
        &self,
        access_token: &str,
        refresh_value: Option<&str>,
    ) -> Result<CheckAuthOutcome, ApiError> {
        if validate_access_token(access_token, &self.jwt_secret).is_ok() {
            return Ok(CheckAuthOutcome::Valid);
        }

        let refresh_value = refresh_value.ok_or(ApiError::Unauthorized)?;
        let claims = validate_refresh_value(refresh_value, &self.jwt_secret)?;
        let subject = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized)?;

        let stored = self
            .refresh_tokens
            .find_by_value(refresh_value)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        if stored.user_id != subject || stored.is_expired() {
            return Err(ApiError::Unauthorized);
        }

        let (access_token, _) =
            sign_access_token(subject, &self.jwt_secret, self.access_token_ttl_secs)?;
        Ok(CheckAuthOutcome::Renewed(access_token))
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<R: RefreshTokenRepository> {
    pub refresh_tokens: R,
}

impl<R: RefreshTokenRepository> LogoutUseCase<R> {
    /// Remove a refresh token by literal value. Returns whether a row existed;
    /// the logout handler treats an unknown value as success.
    pub async fn execute(&self, refresh_value: &str) -> Result<bool, ApiError> {
        let deleted = self.refresh_tokens.delete_by_value(refresh_value).await?;
        if !deleted {
            tracing::debug!("logout for unknown refresh token");
        }
        Ok(deleted)
    }
}
