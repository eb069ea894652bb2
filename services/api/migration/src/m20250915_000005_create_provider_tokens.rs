use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProviderTokens::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProviderTokens::ProviderId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProviderTokens::ProviderTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderTokens::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ProviderTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProviderTokens::Table, ProviderTokens::ProviderId)
                            .to(Providers::Table, Providers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProviderTokens::Table, ProviderTokens::ProviderTypeId)
                            .to(ProviderTypes::Table, ProviderTypes::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderTokens::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProviderTokens {
    Table,
    Id,
    ProviderId,
    ProviderTypeId,
    Token,
    CreatedAt,
}

#[derive(Iden)]
enum Providers {
    Table,
    Id,
}

#[derive(Iden)]
enum ProviderTypes {
    Table,
    Id,
}
