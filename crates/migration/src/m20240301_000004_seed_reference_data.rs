//! Seed categories, colors and sizes.
//!
//! Ids are fixed so clients can cache them; top-level categories use 1..=9,
//! sub-categories use `parent * 100 + n`.
use sea_orm_migration::prelude::*;

use crate::m20240301_000002_create_reference_tables::{Category, Color, Size};

pub const TOP_CATEGORIES: &[(i32, &str)] = &[(1, "Clothing"), (2, "Shoes"), (3, "Accessories")];

pub const SUB_CATEGORIES: &[(i32, i32, &str)] = &[
    (101, 1, "Outer"),
    (102, 1, "Top"),
    (103, 1, "Dress"),
    (104, 1, "Pants"),
    (105, 1, "Skirt"),
    (201, 2, "Sneakers"),
    (202, 2, "Flats"),
    (203, 2, "Boots"),
    (301, 3, "Bag"),
    (302, 3, "Jewelry"),
    (303, 3, "Hat"),
];

pub const COLORS: &[(i32, &str)] = &[
    (1, "Black"),
    (2, "White"),
    (3, "Gray"),
    (4, "Beige"),
    (5, "Navy"),
    (6, "Red"),
    (7, "Pink"),
    (8, "Blue"),
];

pub const SIZES: &[(i32, &str)] = &[(1, "Free"), (2, "XS"), (3, "S"), (4, "M"), (5, "L"), (6, "XL")];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Parents first: the self-referencing FK is checked per statement
        let mut parents = Query::insert();
        parents.into_table(Category::Table).columns([Category::Id, Category::Name]);
        for (id, name) in TOP_CATEGORIES {
            parents.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(parents.to_owned()).await?;

        let mut subs = Query::insert();
        subs.into_table(Category::Table).columns([Category::Id, Category::ParentId, Category::Name]);
        for (id, parent, name) in SUB_CATEGORIES {
            subs.values_panic([(*id).into(), (*parent).into(), (*name).into()]);
        }
        manager.exec_stmt(subs.to_owned()).await?;

        let mut colors = Query::insert();
        colors.into_table(Color::Table).columns([Color::Id, Color::Name]);
        for (id, name) in COLORS {
            colors.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(colors.to_owned()).await?;

        let mut sizes = Query::insert();
        sizes.into_table(Size::Table).columns([Size::Id, Size::Name]);
        for (id, name) in SIZES {
            sizes.values_panic([(*id).into(), (*name).into()]);
        }
        manager.exec_stmt(sizes.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.exec_stmt(Query::delete().from_table(Size::Table).to_owned()).await?;
        manager.exec_stmt(Query::delete().from_table(Color::Table).to_owned()).await?;
        manager
            .exec_stmt(Query::delete().from_table(Category::Table).and_where(Expr::col(Category::ParentId).is_not_null()).to_owned())
            .await?;
        manager.exec_stmt(Query::delete().from_table(Category::Table).to_owned()).await
    }
}
