//! Create `product` and `product_option` tables.
//!
//! A product belongs to one seller and one sub-category; each option is a
//! color/size combination with an optional stock count (NULL = not managed).
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240301_000002_create_reference_tables::{Category, Color, Size};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(uuid(Product::Id).primary_key())
                    .col(uuid(Product::SellerId).not_null())
                    .col(integer(Product::CategoryId).not_null())
                    .col(string_len(Product::Name, 128).not_null())
                    .col(string_len(Product::CodeNumber, 32).unique_key().not_null())
                    .col(string_len(Product::ProductNumber, 64).not_null())
                    .col(text_null(Product::Description))
                    .col(string_len(Product::MainImage, 512).not_null())
                    .col(big_integer(Product::Price).not_null())
                    .col(integer(Product::DiscountRate).not_null())
                    .col(timestamp_with_time_zone_null(Product::DiscountStart))
                    .col(timestamp_with_time_zone_null(Product::DiscountEnd))
                    .col(integer(Product::MinimumSale).not_null())
                    .col(integer(Product::MaximumSale).not_null())
                    .col(boolean(Product::IsSell).not_null())
                    .col(boolean(Product::IsDiscount).not_null())
                    .col(boolean(Product::IsDisplay).not_null())
                    .col(timestamp_with_time_zone(Product::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Product::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_seller")
                            .from(Product::Table, Product::SellerId)
                            .to(Seller::Table, Seller::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_category")
                            .from(Product::Table, Product::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductOption::Table)
                    .if_not_exists()
                    .col(uuid(ProductOption::Id).primary_key())
                    .col(uuid(ProductOption::ProductId).not_null())
                    .col(integer(ProductOption::ColorId).not_null())
                    .col(integer(ProductOption::SizeId).not_null())
                    .col(integer_null(ProductOption::Stock))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_option_product")
                            .from(ProductOption::Table, ProductOption::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_option_color")
                            .from(ProductOption::Table, ProductOption::ColorId)
                            .to(Color::Table, Color::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_option_size")
                            .from(ProductOption::Table, ProductOption::SizeId)
                            .to(Size::Table, Size::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per color/size pair within a product
        manager
            .create_index(
                Index::create()
                    .name("idx_product_option_unique")
                    .table(ProductOption::Table)
                    .col(ProductOption::ProductId)
                    .col(ProductOption::ColorId)
                    .col(ProductOption::SizeId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductOption::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Product {
    Table,
    Id,
    SellerId,
    CategoryId,
    Name,
    CodeNumber,
    ProductNumber,
    Description,
    MainImage,
    Price,
    DiscountRate,
    DiscountStart,
    DiscountEnd,
    MinimumSale,
    MaximumSale,
    IsSell,
    IsDiscount,
    IsDisplay,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductOption { Table, Id, ProductId, ColorId, SizeId, Stock }

#[derive(DeriveIden)]
enum Seller { Table, Id }
