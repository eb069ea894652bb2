use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{RoleRepository, UserCache, UserRepository};
use crate::domain::types::{User, UserRole};
use crate::error::ApiError;

// ── FindUser ─────────────────────────────────────────────────────────────────

/// Identifier-based lookup: a UUID-shaped identifier resolves by id, anything
/// else by nick name. Reads go through the TTL cache.
pub struct FindUserUseCase<R: UserRepository, C: UserCache> {
    pub users: R,
    pub cache: C,
}

impl<R: UserRepository, C: UserCache> FindUserUseCase<R, C> {
    pub async fn execute(&self, identifier: &str) -> Result<User, ApiError> {
        if let Some(user) = self.cache.get(identifier).await {
            return Ok(user);
        }

        let user = match identifier.parse::<Uuid>() {
            Ok(id) => self.users.find_by_id(id).await?,
            Err(_) => self.users.find_by_nick_name(identifier).await?,
        };
        let user = user.ok_or_else(|| ApiError::UserNotFound(identifier.to_owned()))?;

        self.cache.put(identifier, &user).await;
        Ok(user)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserInput {
    pub id: Uuid,
    pub nick_name: Option<String>,
    pub display_name: Option<String>,
    pub is_blocked: Option<bool>,
    pub role_id: Option<Uuid>,
}

pub struct UpdateUserUseCase<U: UserRepository, R: RoleRepository, C: UserCache> {
    pub users: U,
    pub roles: R,
    pub cache: C,
}

impl<U: UserRepository, R: RoleRepository, C: UserCache> UpdateUserUseCase<U, R, C> {
    pub async fn execute(&self, requester: Uuid, input: UpdateUserInput) -> Result<User, ApiError> {
        if input.nick_name.is_none()
            && input.display_name.is_none()
            && input.is_blocked.is_none()
            && input.role_id.is_none()
        {
            return Err(ApiError::MissingData);
        }

        let mut user = self
            .users
            .find_by_id(input.id)
            .await?
            .ok_or_else(|| ApiError::UserNotFound(input.id.to_string()))?;

        let requester_is_admin = matches!(
            self.roles.role_of_user(requester).await?.map(|r| r.name),
            Some(UserRole::Admin)
        );
        if requester != input.id && !requester_is_admin {
            return Err(ApiError::Forbidden);
        }
        // Role and blocked-flag changes are an admin-only operation.
        if (input.is_blocked.is_some() || input.role_id.is_some()) && !requester_is_admin {
            return Err(ApiError::Forbidden);
        }

        // Drop cached entries before writing so a racing read repopulates
        // from the updated row instead of serving stale data until expiry.
        self.cache.invalidate(&user).await;

        if let Some(nick_name) = input.nick_name {
            user.nick_name = Some(nick_name);
        }
        if let Some(display_name) = input.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(is_blocked) = input.is_blocked {
            user.is_blocked = is_blocked;
        }
        if let Some(role_id) = input.role_id {
            user.role_id = role_id;
        }
        user.updated_at = Utc::now();

        self.users.update(&user).await?;
        Ok(user)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository, R: RoleRepository, C: UserCache> {
    pub users: U,
    pub roles: R,
    pub cache: C,
}

impl<U: UserRepository, R: RoleRepository, C: UserCache> DeleteUserUseCase<U, R, C> {
    /// Only the user themselves or an admin may delete an account.
    pub async fn execute(&self, target: Uuid, requester: Uuid) -> Result<(), ApiError> {
        if requester != target {
            let requester_is_admin = matches!(
                self.roles.role_of_user(requester).await?.map(|r| r.name),
                Some(UserRole::Admin)
            );
            if !requester_is_admin {
                return Err(ApiError::Forbidden);
            }
        }

        let user = self
            .users
            .find_by_id(target)
            .await?
            .ok_or_else(|| ApiError::UserNotFound(target.to_string()))?;

        self.cache.invalidate(&user).await;

        if !self.users.delete(target).await? {
            return Err(ApiError::UserNotFound(target.to_string()));
        }
        Ok(())
    }
}
