use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{color, product, size};

/// A sellable color/size variant. `stock = None` means stock is not tracked.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_option")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub color_id: i32,
    pub size_id: i32,
    pub stock: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Product, Color, Size }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Product => Entity::belongs_to(product::Entity)
                .from(Column::ProductId)
                .to(product::Column::Id)
                .into(),
            Relation::Color => Entity::belongs_to(color::Entity)
                .from(Column::ColorId)
                .to(color::Column::Id)
                .into(),
            Relation::Size => Entity::belongs_to(size::Entity)
                .from(Column::SizeId)
                .to(size::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_stock(stock: Option<i32>) -> Result<(), crate::errors::ModelError> {
    match stock {
        Some(s) if s < 0 => Err(crate::errors::ModelError::Validation("stock must not be negative".into())),
        _ => Ok(()),
    }
}
