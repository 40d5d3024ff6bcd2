//! Create `seller` and `seller_credentials` tables.
//!
//! A seller owns products; credentials are kept apart so the account row can
//! be read without touching the password hash.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Seller::Table)
                    .if_not_exists()
                    .col(uuid(Seller::Id).primary_key())
                    .col(string_len(Seller::Account, 64).unique_key().not_null())
                    .col(string_len(Seller::BrandName, 128).not_null())
                    .col(timestamp_with_time_zone(Seller::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Seller::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SellerCredentials::Table)
                    .if_not_exists()
                    .col(uuid(SellerCredentials::SellerId).primary_key())
                    .col(string_len(SellerCredentials::PasswordHash, 255).not_null())
                    .col(string_len(SellerCredentials::PasswordAlgorithm, 32).not_null())
                    .col(timestamp_with_time_zone(SellerCredentials::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seller_credentials_seller")
                            .from(SellerCredentials::Table, SellerCredentials::SellerId)
                            .to(Seller::Table, Seller::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SellerCredentials::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Seller::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Seller { Table, Id, Account, BrandName, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum SellerCredentials { Table, SellerId, PasswordHash, PasswordAlgorithm, UpdatedAt }
