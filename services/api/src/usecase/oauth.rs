use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{
    IdentityProviderPort, ProviderRepository, ProviderTokenRepository, ProviderTypeRepository,
    RefreshTokenRepository, RoleRepository, SessionRepository, UserRepository,
};
use crate::domain::types::{
    Provider, ProviderKind, ProviderToken, Session, TokenPair, User, UserRole,
};
use crate::error::ApiError;
use crate::usecase::token::issue_token_pair;

pub struct AuthenticateProviderUserInput {
    pub provider_token: String,
    pub user_agent: String,
}

/// OAuth callback orchestration: resolve the provider-side identity, ensure a
/// local account and provider link exist, record the provider token, issue a
/// token pair and anchor exactly one session per provider token.
pub struct AuthenticateProviderUserUseCase<U, RO, PT, P, PK, RT, S, IDP>
where
    U: UserRepository,
    RO: RoleRepository,
    PT: ProviderTypeRepository,
    P: ProviderRepository,
    PK: ProviderTokenRepository,
    RT: RefreshTokenRepository,
    S: SessionRepository,
    IDP: IdentityProviderPort,
{
    pub users: U,
    pub roles: RO,
    pub provider_types: PT,
    pub providers: P,
    pub provider_tokens: PK,
    pub refresh_tokens: RT,
    pub sessions: S,
    pub idp: IDP,
    pub jwt_secret: String,
    pub access_token_ttl_secs: u64,
}

impl<U, RO, PT, P, PK, RT, S, IDP> AuthenticateProviderUserUseCase<U, RO, PT, P, PK, RT, S, IDP>
where
    U: UserRepository,
    RO: RoleRepository,
    PT: ProviderTypeRepository,
    P: ProviderRepository,
    PK: ProviderTokenRepository,
    RT: RefreshTokenRepository,
    S: SessionRepository,
    IDP: IdentityProviderPort,
{
    pub async fn execute(
        &self,
        input: AuthenticateProviderUserInput,
    ) -> Result<TokenPair, ApiError> {
        let provider_user_id = self.idp.fetch_user_id(&input.provider_token).await?;

        let provider_type = self
            .provider_types
            .find_by_kind(ProviderKind::Yandex)
            .await?
            .ok_or_else(|| anyhow::anyhow!("provider type YANDEX not seeded"))?;

        let (user, provider) = match self
            .providers
            .find_by_provider_user(&provider_user_id, provider_type.id)
            .await?
        {
            Some(link) => {
                let user = self
                    .users
                    .find_by_id(link.user_id)
                    .await?
                    .ok_or_else(|| {
                        anyhow::anyhow!("provider link {} references a missing user", link.id)
                    })?;
                (user, link)
            }
            None => self
                .register_user(&provider_user_id, provider_type.id)
                .await
                .map(|(user, link)| {
                    tracing::info!(user_id = %user.id, "registered user on first login");
                    (user, link)
                })?,
        };

        if user.is_blocked {
            return Err(ApiError::Forbidden);
        }

        let provider_token = match self
            .provider_tokens
            .find_by_value(&input.provider_token)
            .await?
        {
            Some(token) => token,
            None => {
                let token = ProviderToken {
                    id: Uuid::now_v7(),
                    provider_id: provider.id,
                    provider_type_id: provider_type.id,
                    token: input.provider_token.clone(),
                    created_at: Utc::now(),
                };
                self.provider_tokens.create(&token).await?;
                token
            }
        };

        let pair = issue_token_pair(
            &self.refresh_tokens,
            &self.jwt_secret,
            self.access_token_ttl_secs,
            user.id,
            &input.user_agent,
        )
        .await?;

        // Lookup-before-create keeps a replayed callback from inserting a
        // second session; an existing session gets its token pointer repaired.
        match self
            .sessions
            .find_by_provider_token(provider_token.id)
            .await?
        {
            Some(session) if session.refresh_token_id != pair.refresh.id => {
                self.sessions
                    .update_refresh_token(session.id, pair.refresh.id)
                    .await?;
            }
            Some(_) => {}
            None => {
                self.sessions
                    .create(&Session {
                        id: Uuid::now_v7(),
                        provider_token_id: provider_token.id,
                        refresh_token_id: pair.refresh.id,
                        created_at: Utc::now(),
                    })
                    .await?;
            }
        }

        Ok(pair)
    }

    async fn register_user(
        &self,
        provider_user_id: &str,
        provider_type_id: Uuid,
    ) -> Result<(User, Provider), ApiError> {
        let role = self
            .roles
            .find_by_name(UserRole::User)
            .await?
            .ok_or_else(|| anyhow::anyhow!("role USER not seeded"))?;

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            nick_name: None,
            display_name: None,
            is_blocked: false,
            role_id: role.id,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let link = Provider {
            id: Uuid::now_v7(),
            user_id: user.id,
            provider_type_id,
            provider_user_id: provider_user_id.to_owned(),
        };
        self.providers.create(&link).await?;

        Ok((user, link))
    }
}
