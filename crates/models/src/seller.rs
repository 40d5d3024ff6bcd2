use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seller")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub account: String,
    pub brand_name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// Accounts are 4..=64 chars of ASCII alphanumerics, `_`, `-` or `.`.
pub fn validate_account(account: &str) -> Result<(), errors::ModelError> {
    let len = account.chars().count();
    if !(4..=64).contains(&len) {
        return Err(errors::ModelError::Validation("account must be 4..=64 characters".into()));
    }
    if !account.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
        return Err(errors::ModelError::Validation("account contains invalid characters".into()));
    }
    Ok(())
}

pub fn validate_brand_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("brand_name required".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, account: &str, brand_name: &str) -> Result<Model, errors::ModelError> {
    validate_account(account)?;
    validate_brand_name(brand_name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        account: Set(account.to_string()),
        brand_name: Set(brand_name.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_account<C: ConnectionTrait>(db: &C, account: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Account.eq(account))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
