use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{CategoryView, ColorView, ProductDetail, ProductRecord, ProductSummary, SizeView};
use crate::errors::ServiceError;

/// Source of per-request sessions.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Open a session; the caller must finish it with `commit` or `rollback`.
    async fn begin(&self) -> Result<Box<dyn ProductSession>, ServiceError>;
}

/// A unit of work over the product tables. Writes become visible to other
/// sessions only after `commit`; both `commit` and `rollback` consume the
/// session so it is released exactly once.
#[async_trait]
pub trait ProductSession: Send {
    async fn top_categories(&mut self) -> Result<Vec<CategoryView>, ServiceError>;
    async fn find_category(&mut self, id: i32) -> Result<Option<CategoryView>, ServiceError>;
    async fn sub_categories(&mut self, parent_id: i32) -> Result<Vec<CategoryView>, ServiceError>;
    async fn colors(&mut self) -> Result<Vec<ColorView>, ServiceError>;
    async fn sizes(&mut self) -> Result<Vec<SizeView>, ServiceError>;

    async fn insert_product(&mut self, record: &ProductRecord) -> Result<(), ServiceError>;
    /// Overwrite product columns and replace its options.
    async fn update_product(&mut self, record: &ProductRecord) -> Result<(), ServiceError>;
    /// Only returns the product when it belongs to `seller_id`.
    async fn find_product(&mut self, seller_id: Uuid, product_id: Uuid) -> Result<Option<ProductDetail>, ServiceError>;
    /// All products of a seller, newest first.
    async fn list_products(&mut self, seller_id: Uuid) -> Result<Vec<ProductSummary>, ServiceError>;

    async fn commit(self: Box<Self>) -> Result<(), ServiceError>;
    async fn rollback(self: Box<Self>) -> Result<(), ServiceError>;
}
