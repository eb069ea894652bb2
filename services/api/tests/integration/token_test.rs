use chrono::{Duration, Utc};
use uuid::Uuid;

use praxis_api::domain::types::{REFRESH_TOKEN_TTL_DAYS, RefreshToken};
use praxis_api::error::ApiError;
use praxis_api::usecase::token::{
    CheckAuthOutcome, CheckAuthUseCase, LogoutUseCase, RefreshTokensUseCase, issue_token_pair,
    mint_refresh_value, sign_access_token,
};

use crate::helpers::{MockRefreshTokenRepo, MockRoleRepo, MockUserRepo, TEST_JWT_SECRET, test_user};

const UA: &str = "Mozilla/5.0 (integration tests)";

fn refresh_usecase(
    tokens: &MockRefreshTokenRepo,
    users: &MockUserRepo,
) -> RefreshTokensUseCase<MockRefreshTokenRepo, MockUserRepo> {
    RefreshTokensUseCase {
        refresh_tokens: tokens.clone(),
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        access_token_ttl_secs: 3600,
    }
}

// ── issue → refresh ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_rotate_refresh_value_on_immediate_refresh() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(praxis_api::domain::types::UserRole::User));
    let users = MockUserRepo::new(vec![user.clone()]);
    let tokens = MockRefreshTokenRepo::empty();

    let issued = issue_token_pair(&tokens, TEST_JWT_SECRET, 3600, user.id, UA)
        .await
        .unwrap();

    let refreshed = refresh_usecase(&tokens, &users)
        .execute(&issued.refresh.token, UA)
        .await
        .unwrap();

    assert!(!refreshed.access_token.is_empty());
    assert_ne!(
        refreshed.refresh.token, issued.refresh.token,
        "refresh value must rotate on use"
    );

    // Rotation is in place: still one row, same id, new value.
    let stored = tokens.tokens_handle();
    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, issued.refresh.id);
    assert_eq!(stored[0].token, refreshed.refresh.token);
}

#[tokio::test]
async fn should_reissue_in_place_for_same_user_agent() {
    let user_id = Uuid::now_v7();
    let tokens = MockRefreshTokenRepo::empty();

    let first = issue_token_pair(&tokens, TEST_JWT_SECRET, 3600, user_id, UA)
        .await
        .unwrap();
    let second = issue_token_pair(&tokens, TEST_JWT_SECRET, 3600, user_id, UA)
        .await
        .unwrap();

    assert_eq!(first.refresh.id, second.refresh.id);
    assert_ne!(first.refresh.token, second.refresh.token);

    let stored = tokens.tokens_handle();
    assert_eq!(stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_refresh_with_different_user_agent() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(praxis_api::domain::types::UserRole::User));
    let users = MockUserRepo::new(vec![user.clone()]);
    let tokens = MockRefreshTokenRepo::empty();

    let issued = issue_token_pair(&tokens, TEST_JWT_SECRET, 3600, user.id, UA)
        .await
        .unwrap();

    let result = refresh_usecase(&tokens, &users)
        .execute(&issued.refresh.token, "curl/8.0")
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_expired_stored_token_even_with_matching_user_agent() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(praxis_api::domain::types::UserRole::User));
    let users = MockUserRepo::new(vec![user.clone()]);

    let expired = RefreshToken {
        id: Uuid::now_v7(),
        user_id: user.id,
        token: "spent-long-ago".to_owned(),
        user_agent: UA.to_owned(),
        expires_at: Utc::now() - Duration::days(1),
    };
    let tokens = MockRefreshTokenRepo::new(vec![expired]);

    let result = refresh_usecase(&tokens, &users)
        .execute("spent-long-ago", UA)
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_unknown_refresh_value() {
    let users = MockUserRepo::empty();
    let tokens = MockRefreshTokenRepo::empty();

    let result = refresh_usecase(&tokens, &users).execute("never-issued", UA).await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_allow_exactly_one_of_two_concurrent_refreshes() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(praxis_api::domain::types::UserRole::User));
    let users = MockUserRepo::new(vec![user.clone()]);
    let tokens = MockRefreshTokenRepo::empty();

    let issued = issue_token_pair(&tokens, TEST_JWT_SECRET, 3600, user.id, UA)
        .await
        .unwrap();

    let a = refresh_usecase(&tokens, &users);
    let b = refresh_usecase(&tokens, &users);
    let (first, second) = tokio::join!(
        a.execute(&issued.refresh.token, UA),
        b.execute(&issued.refresh.token, UA),
    );

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one concurrent refresh may win");

    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(loser, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_refresh_for_blocked_user() {
    let roles = MockRoleRepo::seeded();
    let mut user = test_user(roles.role_id(praxis_api::domain::types::UserRole::User));
    user.is_blocked = true;
    let users = MockUserRepo::new(vec![user.clone()]);
    let tokens = MockRefreshTokenRepo::empty();

    let issued = issue_token_pair(&tokens, TEST_JWT_SECRET, 3600, user.id, UA)
        .await
        .unwrap();

    let result = refresh_usecase(&tokens, &users)
        .execute(&issued.refresh.token, UA)
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

// ── CheckAuth ────────────────────────────────────────────────────────────────

fn check_auth_usecase(tokens: &MockRefreshTokenRepo) -> CheckAuthUseCase<MockRefreshTokenRepo> {
    CheckAuthUseCase {
        refresh_tokens: tokens.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        access_token_ttl_secs: 3600,
    }
}

#[tokio::test]
async fn should_report_valid_for_live_access_token() {
    let tokens = MockRefreshTokenRepo::empty();
    let (access, _) = sign_access_token(Uuid::now_v7(), TEST_JWT_SECRET, 3600).unwrap();

    let outcome = check_auth_usecase(&tokens).execute(&access, None).await.unwrap();
    assert!(matches!(outcome, CheckAuthOutcome::Valid));
}

#[tokio::test]
async fn should_renew_access_token_without_rotating_refresh() {
    let user_id = Uuid::now_v7();
    let tokens = MockRefreshTokenRepo::empty();
    let issued = issue_token_pair(&tokens, TEST_JWT_SECRET, 3600, user_id, UA)
        .await
        .unwrap();

    let outcome = check_auth_usecase(&tokens)
        .execute("stale-access-token", Some(&issued.refresh.token))
        .await
        .unwrap();

    let CheckAuthOutcome::Renewed(access) = outcome else {
        panic!("expected a renewed access token");
    };
    assert!(!access.is_empty());

    // check-auth never rotates the refresh token.
    let stored = tokens.tokens_handle();
    assert_eq!(stored.lock().unwrap()[0].token, issued.refresh.token);
}

#[tokio::test]
async fn should_reject_check_auth_without_refresh_token() {
    let tokens = MockRefreshTokenRepo::empty();
    let result = check_auth_usecase(&tokens).execute("stale-access-token", None).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_check_auth_when_stored_row_expired() {
    let user_id = Uuid::now_v7();
    // JWT itself still valid, server-side row already expired.
    let value = mint_refresh_value(
        user_id,
        TEST_JWT_SECRET,
        Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS),
    )
    .unwrap();
    let tokens = MockRefreshTokenRepo::new(vec![RefreshToken {
        id: Uuid::now_v7(),
        user_id,
        token: value.clone(),
        user_agent: UA.to_owned(),
        expires_at: Utc::now() - Duration::hours(1),
    }]);

    let result = check_auth_usecase(&tokens)
        .execute("stale-access-token", Some(&value))
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_check_auth_when_subject_does_not_own_row() {
    let value = mint_refresh_value(
        Uuid::now_v7(),
        TEST_JWT_SECRET,
        Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS),
    )
    .unwrap();
    // Same literal value stored for a different user.
    let tokens = MockRefreshTokenRepo::new(vec![RefreshToken {
        id: Uuid::now_v7(),
        user_id: Uuid::now_v7(),
        token: value.clone(),
        user_agent: UA.to_owned(),
        expires_at: Utc::now() + Duration::days(1),
    }]);

    let result = check_auth_usecase(&tokens)
        .execute("stale-access-token", Some(&value))
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

// ── Logout ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_treat_logout_of_unknown_token_as_success() {
    let usecase = LogoutUseCase {
        refresh_tokens: MockRefreshTokenRepo::empty(),
    };
    let deleted = usecase.execute("never-issued").await.unwrap();
    assert!(!deleted);
}

#[tokio::test]
async fn should_delete_known_token_on_logout() {
    let user_id = Uuid::now_v7();
    let tokens = MockRefreshTokenRepo::empty();
    let issued = issue_token_pair(&tokens, TEST_JWT_SECRET, 3600, user_id, UA)
        .await
        .unwrap();

    let usecase = LogoutUseCase {
        refresh_tokens: tokens.clone(),
    };
    let deleted = usecase.execute(&issued.refresh.token).await.unwrap();

    assert!(deleted);
    let stored = tokens.tokens_handle();
    assert!(stored.lock().unwrap().is_empty());
}
