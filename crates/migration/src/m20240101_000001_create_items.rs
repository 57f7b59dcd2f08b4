//! Create `items` table.
//!
//! Columns are plain TEXT/BOOLEAN with no primary key and no unique index on
//! `(user_id, item_id)`; uniqueness is enforced by the backend minting ids, not the schema.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::UserId).text())
                    .col(ColumnDef::new(Items::ItemId).text())
                    .col(ColumnDef::new(Items::Title).text())
                    .col(ColumnDef::new(Items::Priority).text())
                    .col(ColumnDef::new(Items::Complete).boolean())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Items::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Items {
    Table,
    UserId,
    ItemId,
    Title,
    Priority,
    Complete,
}
