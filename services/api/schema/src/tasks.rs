use sea_orm::entity::prelude::*;

/// Programming exercise. Resource limits are forwarded verbatim to the
/// code-execution service for every test run.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub theme_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub language: String,
    pub version: String,
    pub run_timeout: i32,
    pub run_memory_limit: i32,
    pub compile_timeout: i32,
    pub compile_memory_limit: i32,
    pub is_disabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::ThemeId",
        to = "super::themes::Column::Id"
    )]
    Theme,
    #[sea_orm(has_many = "super::task_tests::Entity")]
    TaskTests,
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theme.def()
    }
}

impl Related<super::task_tests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaskTests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
