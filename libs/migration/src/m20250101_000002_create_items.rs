use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000001_create_stores::Stores;

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
                    .col(pk_auto(Items::Id))
                    .col(string_len(Items::Name, 80))
                    .col(double(Items::Price))
                    .col(integer(Items::StoreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_store_id")
                            .from(Items::Table, Items::StoreId)
                            .to(Stores::Table, Stores::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Item names are unique within a store
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_items_store_id_name")
                    .table(Items::Table)
                    .col(Items::StoreId)
                    .col(Items::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Items {
    Table,
    Id,
    Name,
    Price,
    StoreId,
}
