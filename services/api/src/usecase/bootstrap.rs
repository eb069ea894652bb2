use uuid::Uuid;

use crate::domain::repository::{ProviderTypeRepository, RoleRepository};
use crate::domain::types::{ProviderKind, ProviderType, Role, UserRole};
use crate::error::ApiError;

/// Idempotent startup seeding of the role and provider-type catalogs.
///
/// Runs once before the server starts serving: each enumerated value is
/// created only when its row is missing, so restarts are no-ops. This is also
/// where the closed enum sets and the persisted catalogs meet; rows outside
/// the enums surface as errors on later reads, never as silent strings.
pub struct SeedCatalogsUseCase<R: RoleRepository, P: ProviderTypeRepository> {
    pub roles: R,
    pub provider_types: P,
}

impl<R: RoleRepository, P: ProviderTypeRepository> SeedCatalogsUseCase<R, P> {
    pub async fn execute(&self) -> Result<(), ApiError> {
        for name in UserRole::ALL {
            if self.roles.find_by_name(name).await?.is_none() {
                self.roles
                    .create(&Role {
                        id: Uuid::now_v7(),
                        name,
                    })
                    .await?;
                tracing::info!(role = name.as_str(), "seeded role");
            }
        }

        for kind in ProviderKind::ALL {
            if self.provider_types.find_by_kind(kind).await?.is_none() {
                self.provider_types
                    .create(&ProviderType {
                        id: Uuid::now_v7(),
                        kind,
                    })
                    .await?;
                tracing::info!(provider = kind.as_str(), "seeded provider type");
            }
        }

        Ok(())
    }
}
