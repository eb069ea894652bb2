use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestResults::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestResults::UserId).uuid().not_null())
                    .col(ColumnDef::new(TestResults::TaskId).integer().not_null())
                    .col(ColumnDef::new(TestResults::TaskTestId).integer().not_null())
                    .col(ColumnDef::new(TestResults::Passed).boolean().not_null())
                    .col(
                        ColumnDef::new(TestResults::ExecutedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestResults::Table, TestResults::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestResults::Table, TestResults::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestResults::Table, TestResults::TaskTestId)
                            .to(TaskTests::Table, TaskTests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_results_user_task")
                    .table(TestResults::Table)
                    .col(TestResults::UserId)
                    .col(TestResults::TaskId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestResults::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TestResults {
    Table,
    Id,
    UserId,
    TaskId,
    TaskTestId,
    Passed,
    ExecutedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Tasks {
    Table,
    Id,
}

#[derive(Iden)]
enum TaskTests {
    Table,
    Id,
}
