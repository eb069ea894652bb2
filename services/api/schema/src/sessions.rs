use sea_orm::entity::prelude::*;

/// Associates one OAuth login event (a provider token) with the refresh token
/// it produced. Not an HTTP session.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub provider_token_id: Uuid,
    pub refresh_token_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::provider_tokens::Entity",
        from = "Column::ProviderTokenId",
        to = "super::provider_tokens::Column::Id"
    )]
    ProviderToken,
    #[sea_orm(
        belongs_to = "super::refresh_tokens::Entity",
        from = "Column::RefreshTokenId",
        to = "super::refresh_tokens::Column::Id"
    )]
    RefreshToken,
}

impl Related<super::provider_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProviderToken.def()
    }
}

impl Related<super::refresh_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RefreshToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
