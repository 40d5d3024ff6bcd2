use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category, errors, seller};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub seller_id: Uuid,
    pub category_id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub code_number: String,
    pub product_number: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub main_image: String,
    pub price: i64,
    pub discount_rate: i32,
    pub discount_start: Option<DateTimeWithTimeZone>,
    pub discount_end: Option<DateTimeWithTimeZone>,
    pub minimum_sale: i32,
    pub maximum_sale: i32,
    pub is_sell: bool,
    pub is_discount: bool,
    pub is_display: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Seller, Category }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Seller => Entity::belongs_to(seller::Entity)
                .from(Column::SellerId)
                .to(seller::Column::Id)
                .into(),
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl Related<seller::Entity> for Entity {
    fn to() -> RelationDef { Relation::Seller.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const MAX_NAME_LEN: usize = 128;

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(errors::ModelError::Validation(format!("name longer than {MAX_NAME_LEN} characters")));
    }
    Ok(())
}

/// Upper bound for a unit price, in the smallest currency unit.
pub const MAX_PRICE: i64 = 1_000_000_000_000;

pub fn validate_price(price: i64) -> Result<(), errors::ModelError> {
    if price < 0 {
        return Err(errors::ModelError::Validation("price must not be negative".into()));
    }
    if price > MAX_PRICE {
        return Err(errors::ModelError::Validation(format!("price must not exceed {MAX_PRICE}")));
    }
    Ok(())
}

pub fn validate_discount_rate(rate: i32) -> Result<(), errors::ModelError> {
    if !(0..=100).contains(&rate) {
        return Err(errors::ModelError::Validation("discount_rate must be within 0..=100".into()));
    }
    Ok(())
}

pub fn validate_sale_range(minimum: i32, maximum: i32) -> Result<(), errors::ModelError> {
    if minimum < 1 {
        return Err(errors::ModelError::Validation("minimum_sale must be >= 1".into()));
    }
    if maximum < minimum {
        return Err(errors::ModelError::Validation("maximum_sale must be >= minimum_sale".into()));
    }
    Ok(())
}

pub fn validate_discount_period(
    start: Option<DateTimeWithTimeZone>,
    end: Option<DateTimeWithTimeZone>,
) -> Result<(), errors::ModelError> {
    if let (Some(s), Some(e)) = (start, end) {
        if e < s {
            return Err(errors::ModelError::Validation("discount_end precedes discount_start".into()));
        }
    }
    Ok(())
}

/// Price after applying `discount_rate` percent, rounded down to the unit.
pub fn discounted_price(price: i64, discount_rate: i32) -> i64 {
    // i128 holds price * 100 for any stored i64 price
    let kept = i128::from(100 - discount_rate.clamp(0, 100));
    (i128::from(price) * kept / 100) as i64
}
