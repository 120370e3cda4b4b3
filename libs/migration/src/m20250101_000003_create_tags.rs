use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000001_create_stores::Stores;
use crate::m20250101_000002_create_items::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(pk_auto(Tags::Id))
                    .col(string_len(Tags::Name, 80))
                    .col(integer(Tags::StoreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tags_store_id")
                            .from(Tags::Table, Tags::StoreId)
                            .to(Stores::Table, Stores::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tags_store_id_name")
                    .table(Tags::Table)
                    .col(Tags::StoreId)
                    .col(Tags::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Link table between items and tags
        manager
            .create_table(
                Table::create()
                    .table(ItemsTags::Table)
                    .if_not_exists()
                    .col(pk_auto(ItemsTags::Id))
                    .col(integer(ItemsTags::ItemId))
                    .col(integer(ItemsTags::TagId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_tags_item_id")
                            .from(ItemsTags::Table, ItemsTags::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_tags_tag_id")
                            .from(ItemsTags::Table, ItemsTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_items_tags_item_id_tag_id")
                    .table(ItemsTags::Table)
                    .col(ItemsTags::ItemId)
                    .col(ItemsTags::TagId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemsTags::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tags::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    StoreId,
}

#[derive(DeriveIden)]
enum ItemsTags {
    Table,
    Id,
    ItemId,
    TagId,
}
