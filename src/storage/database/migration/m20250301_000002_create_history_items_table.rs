use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HistoryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HistoryItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HistoryItems::UserId).uuid().not_null())
                    .col(ColumnDef::new(HistoryItems::Kind).string().not_null())
                    .col(
                        ColumnDef::new(HistoryItems::OriginalPrompt)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HistoryItems::CustomPrompt).text().null())
                    .col(
                        ColumnDef::new(HistoryItems::EnhancePrompt)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(HistoryItems::Answers).json().not_null())
                    .col(ColumnDef::new(HistoryItems::InputImage).json().null())
                    .col(ColumnDef::new(HistoryItems::ImageUrls).json().not_null())
                    .col(
                        ColumnDef::new(HistoryItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_history_items_user_id")
                            .from(HistoryItems::Table, HistoryItems::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_history_items_user_id")
                    .table(HistoryItems::Table)
                    .col(HistoryItems::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_history_items_created_at")
                    .table(HistoryItems::Table)
                    .col(HistoryItems::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HistoryItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum HistoryItems {
    Table,
    Id,
    UserId,
    Kind,
    OriginalPrompt,
    CustomPrompt,
    EnhancePrompt,
    Answers,
    InputImage,
    ImageUrls,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
