use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_task_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Task::Table).if_exists().to_owned())
            .await
    }
}

fn create_task_table() -> TableCreateStatement {
    Table::create()
        .table(Task::Table)
        .if_not_exists()
        .col(pk_auto(Task::Id))
        .col(string_len(Task::Title, 150))
        .col(string_len_null(Task::Description, 500))
        .col(boolean(Task::Done).default(false))
        .to_owned()
}

#[derive(DeriveIden)]
enum Task {
    Table,
    Id,
    Title,
    Description,
    Done,
}
