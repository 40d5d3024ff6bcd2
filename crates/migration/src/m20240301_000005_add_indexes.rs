//! Secondary indexes for the seller product listing.
use sea_orm_migration::prelude::*;

use crate::m20240301_000003_create_product::Product;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_seller_created")
                    .table(Product::Table)
                    .col(Product::SellerId)
                    .col(Product::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_seller_number")
                    .table(Product::Table)
                    .col(Product::SellerId)
                    .col(Product::ProductNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_product_seller_number").table(Product::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_product_seller_created").table(Product::Table).to_owned()).await
    }
}
