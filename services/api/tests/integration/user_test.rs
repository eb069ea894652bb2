use uuid::Uuid;

use praxis_api::domain::types::UserRole;
use praxis_api::error::ApiError;
use praxis_api::usecase::user::{
    DeleteUserUseCase, FindUserUseCase, UpdateUserInput, UpdateUserUseCase,
};

use crate::helpers::{MockRoleRepo, MockUserCache, MockUserRepo, test_user};

fn update_input(id: Uuid) -> UpdateUserInput {
    UpdateUserInput {
        id,
        nick_name: None,
        display_name: None,
        is_blocked: None,
        role_id: None,
    }
}

// ── FindUser ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_find_user_by_id_and_by_nick_name() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let usecase = FindUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        cache: MockUserCache::empty(),
    };

    let by_id = usecase.execute(&user.id.to_string()).await.unwrap();
    assert_eq!(by_id.id, user.id);

    let by_nick = usecase.execute("alice").await.unwrap();
    assert_eq!(by_nick.id, user.id);
}

#[tokio::test]
async fn should_serve_repeated_reads_from_cache() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let repo = MockUserRepo::new(vec![user.clone()]);
    let usecase = FindUserUseCase {
        users: repo.clone(),
        cache: MockUserCache::empty(),
    };

    usecase.execute("alice").await.unwrap();

    // The row disappears from the store; the cached entry still answers.
    repo.users_handle().lock().unwrap().clear();
    let cached = usecase.execute("alice").await.unwrap();
    assert_eq!(cached.id, user.id);
}

#[tokio::test]
async fn should_name_identifier_in_not_found_error() {
    let usecase = FindUserUseCase {
        users: MockUserRepo::empty(),
        cache: MockUserCache::empty(),
    };

    let result = usecase.execute("ghost").await;
    match result {
        Err(ApiError::UserNotFound(identifier)) => assert_eq!(identifier, "ghost"),
        other => panic!("expected UserNotFound, got {other:?}"),
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_let_user_update_own_profile_and_invalidate_cache() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let cache = MockUserCache::empty();
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        roles: roles.clone(),
        cache: cache.clone(),
    };

    let updated = usecase
        .execute(
            user.id,
            UpdateUserInput {
                display_name: Some("Alice A.".to_owned()),
                ..update_input(user.id)
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.display_name.as_deref(), Some("Alice A."));
    // Both cache keys dropped so stale reads cannot survive the write.
    let invalidated = cache.invalidated_keys();
    assert!(invalidated.contains(&user.id.to_string()));
    assert!(invalidated.contains(&"alice".to_owned()));
}

#[tokio::test]
async fn should_forbid_updating_someone_elses_profile() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let stranger = Uuid::now_v7();
    roles.assign(stranger, UserRole::User);
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        roles: roles.clone(),
        cache: MockUserCache::empty(),
    };

    let result = usecase
        .execute(
            stranger,
            UpdateUserInput {
                display_name: Some("Mallory".to_owned()),
                ..update_input(user.id)
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_forbid_role_change_by_non_admin() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    roles.assign(user.id, UserRole::User);
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        roles: roles.clone(),
        cache: MockUserCache::empty(),
    };

    let result = usecase
        .execute(
            user.id,
            UpdateUserInput {
                role_id: Some(roles.role_id(UserRole::Teacher)),
                ..update_input(user.id)
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_let_admin_change_role_and_blocked_flag() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let admin = Uuid::now_v7();
    roles.assign(admin, UserRole::Admin);
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        roles: roles.clone(),
        cache: MockUserCache::empty(),
    };

    let updated = usecase
        .execute(
            admin,
            UpdateUserInput {
                is_blocked: Some(true),
                role_id: Some(roles.role_id(UserRole::Teacher)),
                ..update_input(user.id)
            },
        )
        .await
        .unwrap();

    assert!(updated.is_blocked);
    assert_eq!(updated.role_id, roles.role_id(UserRole::Teacher));
}

#[tokio::test]
async fn should_reject_update_without_any_fields() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let usecase = UpdateUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        roles,
        cache: MockUserCache::empty(),
    };

    let result = usecase.execute(user.id, update_input(user.id)).await;
    assert!(matches!(result, Err(ApiError::MissingData)));
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_let_user_delete_own_account() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let repo = MockUserRepo::new(vec![user.clone()]);
    let cache = MockUserCache::empty();
    let usecase = DeleteUserUseCase {
        users: repo.clone(),
        roles,
        cache: cache.clone(),
    };

    usecase.execute(user.id, user.id).await.unwrap();

    assert!(repo.users_handle().lock().unwrap().is_empty());
    assert!(cache.invalidated_keys().contains(&user.id.to_string()));
}

#[tokio::test]
async fn should_forbid_deleting_other_account_without_admin_role() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let teacher = Uuid::now_v7();
    roles.assign(teacher, UserRole::Teacher);
    let usecase = DeleteUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        roles,
        cache: MockUserCache::empty(),
    };

    let result = usecase.execute(user.id, teacher).await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_let_admin_delete_any_account() {
    let roles = MockRoleRepo::seeded();
    let user = test_user(roles.role_id(UserRole::User));
    let admin = Uuid::now_v7();
    roles.assign(admin, UserRole::Admin);
    let repo = MockUserRepo::new(vec![user.clone()]);
    let usecase = DeleteUserUseCase {
        users: repo.clone(),
        roles,
        cache: MockUserCache::empty(),
    };

    usecase.execute(user.id, admin).await.unwrap();
    assert!(repo.users_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_report_not_found_for_missing_delete_target() {
    let roles = MockRoleRepo::seeded();
    let admin = Uuid::now_v7();
    roles.assign(admin, UserRole::Admin);
    let usecase = DeleteUserUseCase {
        users: MockUserRepo::empty(),
        roles,
        cache: MockUserCache::empty(),
    };

    let result = usecase.execute(Uuid::now_v7(), admin).await;
    assert!(matches!(result, Err(ApiError::UserNotFound(_))));
}
