use sea_orm::entity::prelude::*;

/// Top-level learning unit. Disabled courses are visible to teachers and
/// admins only.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::themes::Entity")]
    Themes,
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Themes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
