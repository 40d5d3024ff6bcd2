use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use models::{category, color, product, product_option, seller, size};

use crate::errors::{db_err, ServiceError};
use crate::product::domain::{
    CategoryView, ColorView, OptionView, ProductDetail, ProductRecord, ProductSummary, SizeView,
};
use crate::product::repository::{ProductRepository, ProductSession};

/// SeaORM-backed repository; every session is a database transaction.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn begin(&self) -> Result<Box<dyn ProductSession>, ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        Ok(Box::new(SeaOrmProductSession { txn }))
    }
}

pub struct SeaOrmProductSession {
    txn: DatabaseTransaction,
}

fn category_view(m: category::Model) -> CategoryView {
    CategoryView { id: m.id, parent_id: m.parent_id, name: m.name }
}

fn option_models(record: &ProductRecord) -> Vec<product_option::ActiveModel> {
    record
        .options
        .iter()
        .map(|o| product_option::ActiveModel {
            id: Set(o.id),
            product_id: Set(record.id),
            color_id: Set(o.color_id),
            size_id: Set(o.size_id),
            stock: Set(o.stock),
        })
        .collect()
}

fn apply_record(am: &mut product::ActiveModel, r: &ProductRecord) {
    am.category_id = Set(r.category_id);
    am.name = Set(r.name.clone());
    am.product_number = Set(r.product_number.clone());
    am.description = Set(r.description.clone());
    am.main_image = Set(r.main_image.clone());
    am.price = Set(r.price);
    am.discount_rate = Set(r.discount_rate);
    am.discount_start = Set(r.discount_start);
    am.discount_end = Set(r.discount_end);
    am.minimum_sale = Set(r.minimum_sale);
    am.maximum_sale = Set(r.maximum_sale);
    am.is_sell = Set(r.is_sell);
    am.is_discount = Set(r.is_discount);
    am.is_display = Set(r.is_display);
    am.updated_at = Set(Utc::now().into());
}

impl SeaOrmProductSession {
    async fn insert_options(&self, record: &ProductRecord) -> Result<(), ServiceError> {
        let rows = option_models(record);
        // insert_many rejects an empty batch
        if rows.is_empty() {
            return Ok(());
        }
        product_option::Entity::insert_many(rows).exec(&self.txn).await.map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl ProductSession for SeaOrmProductSession {
    async fn top_categories(&mut self) -> Result<Vec<CategoryView>, ServiceError> {
        let rows = category::Entity::find()
            .filter(category::Column::ParentId.is_null())
            .order_by_asc(category::Column::Id)
            .all(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(category_view).collect())
    }

    async fn find_category(&mut self, id: i32) -> Result<Option<CategoryView>, ServiceError> {
        let found = category::Entity::find_by_id(id).one(&self.txn).await.map_err(db_err)?;
        Ok(found.map(category_view))
    }

    async fn sub_categories(&mut self, parent_id: i32) -> Result<Vec<CategoryView>, ServiceError> {
        let rows = category::Entity::find()
            .filter(category::Column::ParentId.eq(parent_id))
            .order_by_asc(category::Column::Id)
            .all(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(category_view).collect())
    }

    async fn colors(&mut self) -> Result<Vec<ColorView>, ServiceError> {
        let rows = color::Entity::find().order_by_asc(color::Column::Id).all(&self.txn).await.map_err(db_err)?;
        Ok(rows.into_iter().map(|c| ColorView { id: c.id, name: c.name }).collect())
    }

    async fn sizes(&mut self) -> Result<Vec<SizeView>, ServiceError> {
        let rows = size::Entity::find().order_by_asc(size::Column::Id).all(&self.txn).await.map_err(db_err)?;
        Ok(rows.into_iter().map(|s| SizeView { id: s.id, name: s.name }).collect())
    }

    async fn insert_product(&mut self, record: &ProductRecord) -> Result<(), ServiceError> {
        let now = Utc::now().into();
        let mut am = product::ActiveModel {
            id: Set(record.id),
            seller_id: Set(record.seller_id),
            code_number: Set(record.code_number.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        apply_record(&mut am, record);
        am.insert(&self.txn).await.map_err(db_err)?;
        self.insert_options(record).await
    }

    async fn update_product(&mut self, record: &ProductRecord) -> Result<(), ServiceError> {
        let existing = product::Entity::find_by_id(record.id)
            .filter(product::Column::SellerId.eq(record.seller_id))
            .one(&self.txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found("product"))?;
        let mut am: product::ActiveModel = existing.into();
        apply_record(&mut am, record);
        am.update(&self.txn).await.map_err(db_err)?;

        product_option::Entity::delete_many()
            .filter(product_option::Column::ProductId.eq(record.id))
            .exec(&self.txn)
            .await
            .map_err(db_err)?;
        self.insert_options(record).await
    }

    async fn find_product(&mut self, seller_id: Uuid, product_id: Uuid) -> Result<Option<ProductDetail>, ServiceError> {
        let Some(p) = product::Entity::find_by_id(product_id)
            .filter(product::Column::SellerId.eq(seller_id))
            .one(&self.txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        let options = product_option::Entity::find()
            .filter(product_option::Column::ProductId.eq(p.id))
            .order_by_asc(product_option::Column::ColorId)
            .order_by_asc(product_option::Column::SizeId)
            .all(&self.txn)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|o| OptionView { id: o.id, color_id: o.color_id, size_id: o.size_id, stock: o.stock })
            .collect();
        Ok(Some(ProductDetail {
            id: p.id,
            seller_id: p.seller_id,
            category_id: p.category_id,
            name: p.name,
            code_number: p.code_number,
            product_number: p.product_number,
            description: p.description,
            main_image: p.main_image,
            price: p.price,
            discount_rate: p.discount_rate,
            discount_start: p.discount_start,
            discount_end: p.discount_end,
            minimum_sale: p.minimum_sale,
            maximum_sale: p.maximum_sale,
            is_sell: p.is_sell,
            is_discount: p.is_discount,
            is_display: p.is_display,
            created_at: p.created_at,
            updated_at: p.updated_at,
            options,
        }))
    }

    async fn list_products(&mut self, seller_id: Uuid) -> Result<Vec<ProductSummary>, ServiceError> {
        let rows = product::Entity::find()
            .filter(product::Column::SellerId.eq(seller_id))
            .order_by_desc(product::Column::CreatedAt)
            .order_by_desc(product::Column::Id)
            .find_also_related(seller::Entity)
            .all(&self.txn)
            .await
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|(p, s)| ProductSummary {
                id: p.id,
                discounted_price: if p.is_discount { product::discounted_price(p.price, p.discount_rate) } else { p.price },
                name: p.name,
                code_number: p.code_number,
                product_number: p.product_number,
                main_image: p.main_image,
                brand: s.map(|s| s.brand_name).unwrap_or_default(),
                price: p.price,
                discount_rate: p.discount_rate,
                is_sell: p.is_sell,
                is_discount: p.is_discount,
                is_display: p.is_display,
                created_at: p.created_at,
            })
            .collect())
    }

    async fn commit(self: Box<Self>) -> Result<(), ServiceError> {
        self.txn.commit().await.map_err(db_err)
    }

    async fn rollback(self: Box<Self>) -> Result<(), ServiceError> {
        self.txn.rollback().await.map_err(db_err)
    }
}
