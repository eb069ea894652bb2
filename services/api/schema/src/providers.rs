use sea_orm::entity::prelude::*;

/// Link between a local user and one external identity.
/// `(provider_user_id, provider_type_id)` is unique: one local account per
/// provider-side identity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "providers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider_type_id: Uuid,
    pub provider_user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::provider_types::Entity",
        from = "Column::ProviderTypeId",
        to = "super::provider_types::Column::Id"
    )]
    ProviderType,
    #[sea_orm(has_many = "super::provider_tokens::Entity")]
    ProviderTokens,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::provider_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProviderType.def()
    }
}

impl Related<super::provider_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProviderTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
