//! Create the lookup tables the registration form is built from:
//! `category` (two levels, self-referencing), `color` and `size`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(integer(Category::Id).primary_key())
                    .col(integer_null(Category::ParentId))
                    .col(string_len(Category::Name, 64).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_parent")
                            .from(Category::Table, Category::ParentId)
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
                    .table(Color::Table)
                    .if_not_exists()
                    .col(integer(Color::Id).primary_key())
                    .col(string_len(Color::Name, 32).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Size::Table)
                    .if_not_exists()
                    .col(integer(Size::Id).primary_key())
                    .col(string_len(Size::Name, 32).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Size::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Color::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Category::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Category { Table, Id, ParentId, Name }

#[derive(DeriveIden)]
pub(crate) enum Color { Table, Id, Name }

#[derive(DeriveIden)]
pub(crate) enum Size { Table, Id, Name }
