//! In-memory product store used by unit tests, router tests and benches.
//!
//! A session works on a private copy of the catalog; its writes are replayed
//! onto the shared catalog on `commit` and dropped on `rollback`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use migration::seed;
use models::product::discounted_price;

use crate::errors::ServiceError;
use crate::product::domain::{
    CategoryView, ColorView, OptionView, ProductDetail, ProductRecord, ProductSummary, SizeView, Timestamp,
};
use crate::product::repository::{ProductRepository, ProductSession};

/// How sessions handed out by the repository were released.
#[derive(Debug, Default)]
pub struct SessionStats {
    begun: AtomicUsize,
    committed: AtomicUsize,
    rolled_back: AtomicUsize,
    abandoned: AtomicUsize,
}

impl SessionStats {
    pub fn begun(&self) -> usize { self.begun.load(Ordering::SeqCst) }
    pub fn committed(&self) -> usize { self.committed.load(Ordering::SeqCst) }
    pub fn rolled_back(&self) -> usize { self.rolled_back.load(Ordering::SeqCst) }
    /// Sessions dropped without commit or rollback.
    pub fn abandoned(&self) -> usize { self.abandoned.load(Ordering::SeqCst) }
    /// Sessions begun but not released yet.
    pub fn open(&self) -> usize {
        self.begun() - self.committed() - self.rolled_back() - self.abandoned()
    }
}

#[derive(Debug, Clone)]
struct StoredProduct {
    record: ProductRecord,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
struct Catalog {
    categories: Vec<CategoryView>,
    colors: Vec<ColorView>,
    sizes: Vec<SizeView>,
    brands: HashMap<Uuid, String>,
    products: Vec<StoredProduct>,
}

impl Catalog {
    fn seeded() -> Self {
        let mut categories: Vec<CategoryView> = seed::TOP_CATEGORIES
            .iter()
            .map(|(id, name)| CategoryView { id: *id, parent_id: None, name: (*name).to_string() })
            .collect();
        categories.extend(
            seed::SUB_CATEGORIES
                .iter()
                .map(|(id, parent, name)| CategoryView { id: *id, parent_id: Some(*parent), name: (*name).to_string() }),
        );
        Self {
            categories,
            colors: seed::COLORS.iter().map(|(id, name)| ColorView { id: *id, name: (*name).to_string() }).collect(),
            sizes: seed::SIZES.iter().map(|(id, name)| SizeView { id: *id, name: (*name).to_string() }).collect(),
            ..Default::default()
        }
    }

    fn upsert(&mut self, stored: StoredProduct) {
        match self.products.iter_mut().find(|p| p.record.id == stored.record.id) {
            Some(existing) => *existing = stored,
            None => self.products.push(stored),
        }
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    catalog: Arc<Mutex<Catalog>>,
    stats: Arc<SessionStats>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryProductRepository {
    /// Empty store without categories, colors or sizes.
    pub fn new() -> Self { Self::default() }

    /// Store pre-filled with the same reference data the migrations seed.
    pub fn with_reference_data() -> Self {
        Self { catalog: Arc::new(Mutex::new(Catalog::seeded())), ..Default::default() }
    }

    /// Register a seller's brand name so listings can report it.
    pub async fn add_seller(&self, seller_id: Uuid, brand_name: &str) {
        self.catalog.lock().await.brands.insert(seller_id, brand_name.to_string());
    }

    /// Store a product directly with a fixed registration time.
    pub async fn insert_at(&self, record: ProductRecord, created_at: Timestamp) {
        self.catalog.lock().await.upsert(StoredProduct { record, created_at, updated_at: created_at });
    }

    /// Make every subsequent product write fail like a lost connection.
    pub fn fail_writes(&self, on: bool) { self.fail_writes.store(on, Ordering::SeqCst); }

    pub fn stats(&self) -> Arc<SessionStats> { self.stats.clone() }

    /// Committed state of a product, bypassing sessions.
    pub async fn committed_product(&self, product_id: Uuid) -> Option<ProductRecord> {
        let catalog = self.catalog.lock().await;
        catalog.products.iter().find(|p| p.record.id == product_id).map(|p| p.record.clone())
    }

    pub async fn committed_count(&self) -> usize { self.catalog.lock().await.products.len() }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn begin(&self) -> Result<Box<dyn ProductSession>, ServiceError> {
        let working = self.catalog.lock().await.clone();
        self.stats.begun.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemorySession {
            shared: self.catalog.clone(),
            stats: self.stats.clone(),
            fail_writes: self.fail_writes.clone(),
            working,
            pending: Vec::new(),
            released: false,
        }))
    }
}

pub struct InMemorySession {
    shared: Arc<Mutex<Catalog>>,
    stats: Arc<SessionStats>,
    fail_writes: Arc<AtomicBool>,
    working: Catalog,
    pending: Vec<StoredProduct>,
    released: bool,
}

impl InMemorySession {
    fn stage(&mut self, stored: StoredProduct) {
        self.working.upsert(stored.clone());
        self.pending.push(stored);
    }

    fn write_failure(&self) -> Option<ServiceError> {
        self.fail_writes
            .load(Ordering::SeqCst)
            .then(|| ServiceError::Db("connection reset while writing".into()))
    }

    fn summary(&self, p: &StoredProduct) -> ProductSummary {
        let r = &p.record;
        ProductSummary {
            id: r.id,
            name: r.name.clone(),
            code_number: r.code_number.clone(),
            product_number: r.product_number.clone(),
            main_image: r.main_image.clone(),
            brand: self.working.brands.get(&r.seller_id).cloned().unwrap_or_default(),
            price: r.price,
            discount_rate: r.discount_rate,
            discounted_price: if r.is_discount { discounted_price(r.price, r.discount_rate) } else { r.price },
            is_sell: r.is_sell,
            is_discount: r.is_discount,
            is_display: r.is_display,
            created_at: p.created_at,
        }
    }
}

#[async_trait]
impl ProductSession for InMemorySession {
    async fn top_categories(&mut self) -> Result<Vec<CategoryView>, ServiceError> {
        Ok(self.working.categories.iter().filter(|c| c.parent_id.is_none()).cloned().collect())
    }

    async fn find_category(&mut self, id: i32) -> Result<Option<CategoryView>, ServiceError> {
        Ok(self.working.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn sub_categories(&mut self, parent_id: i32) -> Result<Vec<CategoryView>, ServiceError> {
        Ok(self.working.categories.iter().filter(|c| c.parent_id == Some(parent_id)).cloned().collect())
    }

    async fn colors(&mut self) -> Result<Vec<ColorView>, ServiceError> { Ok(self.working.colors.clone()) }

    async fn sizes(&mut self) -> Result<Vec<SizeView>, ServiceError> { Ok(self.working.sizes.clone()) }

    async fn insert_product(&mut self, record: &ProductRecord) -> Result<(), ServiceError> {
        if let Some(err) = self.write_failure() {
            return Err(err);
        }
        if self.working.products.iter().any(|p| p.record.code_number == record.code_number) {
            return Err(ServiceError::Conflict(format!("code_number {} already exists", record.code_number)));
        }
        // registration times stay strictly increasing so newest-first never ties
        let mut now: Timestamp = Utc::now().into();
        if let Some(latest) = self.working.products.iter().map(|p| p.created_at).max() {
            if now <= latest {
                now = latest + Duration::microseconds(1);
            }
        }
        self.stage(StoredProduct { record: record.clone(), created_at: now, updated_at: now });
        Ok(())
    }

    async fn update_product(&mut self, record: &ProductRecord) -> Result<(), ServiceError> {
        let existing = self
            .working
            .products
            .iter()
            .find(|p| p.record.id == record.id && p.record.seller_id == record.seller_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("product"))?;
        let now: Timestamp = Utc::now().into();
        if let Some(err) = self.write_failure() {
            // product columns land, then the option rewrite fails
            let mut partial = existing.record.clone();
            partial.name = record.name.clone();
            partial.price = record.price;
            self.stage(StoredProduct { record: partial, updated_at: now, ..existing });
            return Err(err);
        }
        self.stage(StoredProduct { record: record.clone(), updated_at: now, ..existing });
        Ok(())
    }

    async fn find_product(&mut self, seller_id: Uuid, product_id: Uuid) -> Result<Option<ProductDetail>, ServiceError> {
        let Some(p) = self
            .working
            .products
            .iter()
            .find(|p| p.record.id == product_id && p.record.seller_id == seller_id)
        else {
            return Ok(None);
        };
        let r = &p.record;
        let mut options: Vec<OptionView> = r
            .options
            .iter()
            .map(|o| OptionView { id: o.id, color_id: o.color_id, size_id: o.size_id, stock: o.stock })
            .collect();
        options.sort_by_key(|o| (o.color_id, o.size_id));
        Ok(Some(ProductDetail {
            id: r.id,
            seller_id: r.seller_id,
            category_id: r.category_id,
            name: r.name.clone(),
            code_number: r.code_number.clone(),
            product_number: r.product_number.clone(),
            description: r.description.clone(),
            main_image: r.main_image.clone(),
            price: r.price,
            discount_rate: r.discount_rate,
            discount_start: r.discount_start,
            discount_end: r.discount_end,
            minimum_sale: r.minimum_sale,
            maximum_sale: r.maximum_sale,
            is_sell: r.is_sell,
            is_discount: r.is_discount,
            is_display: r.is_display,
            created_at: p.created_at,
            updated_at: p.updated_at,
            options,
        }))
    }

    async fn list_products(&mut self, seller_id: Uuid) -> Result<Vec<ProductSummary>, ServiceError> {
        let mut own: Vec<&StoredProduct> =
            self.working.products.iter().filter(|p| p.record.seller_id == seller_id).collect();
        own.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.record.id.cmp(&a.record.id)));
        Ok(own.into_iter().map(|p| self.summary(p)).collect())
    }

    async fn commit(self: Box<Self>) -> Result<(), ServiceError> {
        let mut this = self;
        this.released = true;
        let pending = std::mem::take(&mut this.pending);
        let mut shared = this.shared.lock().await;
        for stored in pending {
            shared.upsert(stored);
        }
        this.stats.committed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), ServiceError> {
        let mut this = self;
        this.released = true;
        this.pending.clear();
        this.stats.rolled_back.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for InMemorySession {
    fn drop(&mut self) {
        if !self.released {
            self.stats.abandoned.fetch_add(1, Ordering::SeqCst);
        }
    }
}
