use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::ThemeId).integer().not_null())
                    .col(ColumnDef::new(Tasks::Name).string().not_null())
                    .col(ColumnDef::new(Tasks::Description).text())
                    .col(ColumnDef::new(Tasks::Language).string().not_null())
                    .col(ColumnDef::new(Tasks::Version).string().not_null())
                    .col(ColumnDef::new(Tasks::RunTimeout).integer().not_null())
                    .col(ColumnDef::new(Tasks::RunMemoryLimit).integer().not_null())
                    .col(ColumnDef::new(Tasks::CompileTimeout).integer().not_null())
                    .col(
                        ColumnDef::new(Tasks::CompileMemoryLimit)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tasks::IsDisabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tasks::Table, Tasks::ThemeId)
                            .to(Themes::Table, Themes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tasks {
    Table,
    Id,
    ThemeId,
    Name,
    Description,
    Language,
    Version,
    RunTimeout,
    RunMemoryLimit,
    CompileTimeout,
    CompileMemoryLimit,
    IsDisabled,
}

#[derive(Iden)]
enum Themes {
    Table,
    Id,
}
