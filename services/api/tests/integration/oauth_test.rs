use praxis_api::error::ApiError;
use praxis_api::usecase::oauth::{
    AuthenticateProviderUserInput, AuthenticateProviderUserUseCase,
};

use crate::helpers::{
    MockIdp, MockProviderRepo, MockProviderTokenRepo, MockProviderTypeRepo, MockRefreshTokenRepo,
    MockRoleRepo, MockSessionRepo, MockUserRepo, TEST_JWT_SECRET, test_user,
};

const UA: &str = "Mozilla/5.0 (integration tests)";

struct Fixture {
    users: MockUserRepo,
    roles: MockRoleRepo,
    provider_types: MockProviderTypeRepo,
    providers: MockProviderRepo,
    provider_tokens: MockProviderTokenRepo,
    refresh_tokens: MockRefreshTokenRepo,
    sessions: MockSessionRepo,
}

impl Fixture {
    fn new() -> Self {
        Self {
            users: MockUserRepo::empty(),
            roles: MockRoleRepo::seeded(),
            provider_types: MockProviderTypeRepo::seeded(),
            providers: MockProviderRepo::empty(),
            provider_tokens: MockProviderTokenRepo::empty(),
            refresh_tokens: MockRefreshTokenRepo::empty(),
            sessions: MockSessionRepo::empty(),
        }
    }

    fn usecase(
        &self,
        idp: MockIdp,
    ) -> AuthenticateProviderUserUseCase<
        MockUserRepo,
        MockRoleRepo,
        MockProviderTypeRepo,
        MockProviderRepo,
        MockProviderTokenRepo,
        MockRefreshTokenRepo,
        MockSessionRepo,
        MockIdp,
    > {
        AuthenticateProviderUserUseCase {
            users: self.users.clone(),
            roles: self.roles.clone(),
            provider_types: self.provider_types.clone(),
            providers: self.providers.clone(),
            provider_tokens: self.provider_tokens.clone(),
            refresh_tokens: self.refresh_tokens.clone(),
            sessions: self.sessions.clone(),
            idp,
            jwt_secret: TEST_JWT_SECRET.to_owned(),
            access_token_ttl_secs: 3600,
        }
    }
}

fn login_input(provider_token: &str, user_agent: &str) -> AuthenticateProviderUserInput {
    AuthenticateProviderUserInput {
        provider_token: provider_token.to_owned(),
        user_agent: user_agent.to_owned(),
    }
}

#[tokio::test]
async fn should_register_user_link_and_session_on_first_login() {
    let fixture = Fixture::new();
    let usecase = fixture.usecase(MockIdp::returning("yandex-user-42"));

    let pair = usecase.execute(login_input("prov-token-1", UA)).await.unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh.token.is_empty());

    let users = fixture.users.users_handle();
    let users = users.lock().unwrap();
    assert_eq!(users.len(), 1, "exactly one user registered");

    let providers = fixture.providers.providers_handle();
    let providers = providers.lock().unwrap();
    assert_eq!(providers.len(), 1, "exactly one provider link");
    assert_eq!(providers[0].provider_user_id, "yandex-user-42");
    assert_eq!(providers[0].user_id, users[0].id);

    let sessions = fixture.sessions.sessions_handle();
    let sessions = sessions.lock().unwrap();
    assert_eq!(sessions.len(), 1, "exactly one session");
    assert_eq!(sessions[0].refresh_token_id, pair.refresh.id);
}

#[tokio::test]
async fn should_not_duplicate_session_on_replayed_callback() {
    let fixture = Fixture::new();
    let usecase = fixture.usecase(MockIdp::returning("yandex-user-42"));

    let first = usecase.execute(login_input("prov-token-1", UA)).await.unwrap();
    let second = usecase.execute(login_input("prov-token-1", UA)).await.unwrap();

    // Same user-agent reissues the same row, so the session pointer holds.
    assert_eq!(first.refresh.id, second.refresh.id);

    let users = fixture.users.users_handle();
    assert_eq!(users.lock().unwrap().len(), 1);

    let sessions = fixture.sessions.sessions_handle();
    let sessions = sessions.lock().unwrap();
    assert_eq!(sessions.len(), 1, "replay must not create a second session");
    assert_eq!(sessions[0].refresh_token_id, second.refresh.id);
}

#[tokio::test]
async fn should_repair_session_pointer_when_login_moves_to_new_user_agent() {
    let fixture = Fixture::new();
    let usecase = fixture.usecase(MockIdp::returning("yandex-user-42"));

    usecase.execute(login_input("prov-token-1", UA)).await.unwrap();
    let moved = usecase
        .execute(login_input("prov-token-1", "Mozilla/5.0 (tablet)"))
        .await
        .unwrap();

    let sessions = fixture.sessions.sessions_handle();
    let sessions = sessions.lock().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(
        sessions[0].refresh_token_id, moved.refresh.id,
        "session must point at the token the login produced"
    );
}

#[tokio::test]
async fn should_reuse_existing_account_on_second_device() {
    let fixture = Fixture::new();
    let usecase = fixture.usecase(MockIdp::returning("yandex-user-42"));

    usecase.execute(login_input("prov-token-1", UA)).await.unwrap();
    usecase
        .execute(login_input("prov-token-2", "Mozilla/5.0 (phone)"))
        .await
        .unwrap();

    let users = fixture.users.users_handle();
    assert_eq!(users.lock().unwrap().len(), 1, "one account per provider identity");

    // Distinct provider tokens anchor distinct sessions.
    let sessions = fixture.sessions.sessions_handle();
    assert_eq!(sessions.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_fail_with_bad_gateway_when_provider_omits_user_id() {
    let fixture = Fixture::new();
    let usecase = fixture.usecase(MockIdp::without_id());

    let result = usecase.execute(login_input("prov-token-1", UA)).await;

    assert!(matches!(result, Err(ApiError::BadGateway)));
    let users = fixture.users.users_handle();
    assert!(users.lock().unwrap().is_empty(), "no account without a provider id");
}

#[tokio::test]
async fn should_refuse_login_for_blocked_user() {
    let fixture = Fixture::new();

    // Existing blocked account already linked to the provider identity.
    let role_id = fixture.roles.role_id(praxis_api::domain::types::UserRole::User);
    let mut user = test_user(role_id);
    user.is_blocked = true;
    fixture.users.users_handle().lock().unwrap().push(user.clone());
    fixture
        .providers
        .providers_handle()
        .lock()
        .unwrap()
        .push(praxis_api::domain::types::Provider {
            id: uuid::Uuid::now_v7(),
            user_id: user.id,
            provider_type_id: fixture
                .provider_types
                .provider_types
                .lock()
                .unwrap()[0]
                .id,
            provider_user_id: "yandex-user-42".to_owned(),
        });

    let usecase = fixture.usecase(MockIdp::returning("yandex-user-42"));
    let result = usecase.execute(login_input("prov-token-1", UA)).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}
