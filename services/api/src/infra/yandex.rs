use std::time::Duration;

use serde::Deserialize;

use crate::config::ApiConfig;
use crate::domain::repository::IdentityProviderPort;
use crate::error::ApiError;

const IDP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Yandex OAuth endpoints: authorize redirect, code → token
/// exchange and the user-info lookup.
#[derive(Clone)]
pub struct YandexClient {
    http: reqwest::Client,
    oauth_base: String,
    info_base: String,
    client_id: String,
    client_secret: String,
    callback_url: String,
}

impl YandexClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            oauth_base: config.yandex_oauth_url.trim_end_matches('/').to_owned(),
            info_base: config.yandex_info_url.trim_end_matches('/').to_owned(),
            client_id: config.yandex_client_id.clone(),
            client_secret: config.yandex_client_secret.clone(),
            callback_url: config.yandex_callback_url.clone(),
        }
    }

    /// URL the login endpoint redirects the browser to.
    pub fn authorize_url(&self) -> String {
        format!(
            "{}/authorize?response_type=code&client_id={}&redirect_uri={}",
            self.oauth_base, self.client_id, self.callback_url
        )
    }

    /// Exchange an authorization code for a provider access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, ApiError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];
        let response = self
            .http
            .post(format!("{}/token", self.oauth_base))
            .timeout(IDP_TIMEOUT)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "token exchange request failed");
                ApiError::BadGateway
            })?;

        let body: TokenExchangeResponse =
            response.json().await.map_err(|_| ApiError::BadGateway)?;
        match body.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ApiError::BadGateway),
        }
    }
}

#[derive(Deserialize)]
struct TokenExchangeResponse {
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct UserInfoResponse {
    id: Option<String>,
}

impl IdentityProviderPort for YandexClient {
    async fn fetch_user_id(&self, access_token: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .get(format!("{}/info", self.info_base))
            .timeout(IDP_TIMEOUT)
            .query(&[("format", "json"), ("oauth_token", access_token)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "user-info request failed");
                ApiError::BadGateway
            })?;

        let body: UserInfoResponse = response.json().await.map_err(|_| ApiError::BadGateway)?;
        match body.id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ApiError::BadGateway),
        }
    }
}
