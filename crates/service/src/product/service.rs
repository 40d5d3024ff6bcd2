use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use common::metrics::{SESSIONS_COMMITTED_TOTAL, SESSIONS_ROLLED_BACK_TOTAL};
use models::{product, product_option};

use super::domain::{
    code_number_for, CategoryView, ProductDetail, ProductInput, ProductPage, ProductRecord, ReferenceData,
};
use super::filter::ProductFilter;
use super::repository::{ProductRepository, ProductSession};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Release a session according to the outcome of the work done in it:
/// commit on success, rollback on any error. The session is consumed either
/// way.
pub async fn settle<T>(
    session: Box<dyn ProductSession>,
    outcome: Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    match outcome {
        Ok(value) => {
            session.commit().await?;
            SESSIONS_COMMITTED_TOTAL.inc();
            debug!("session committed");
            Ok(value)
        }
        Err(err) => {
            if let Err(rb) = session.rollback().await {
                warn!(error = %rb, "rollback failed");
            }
            SESSIONS_ROLLED_BACK_TOTAL.inc();
            debug!(status = err.status_code(), error = %err, "session rolled back");
            Err(err)
        }
    }
}

/// Product registration, editing and listing for one seller at a time.
///
/// Every public method opens exactly one session and settles it before
/// returning.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self { Self { repo } }

    /// Top-level categories, colors and sizes for the registration form.
    #[instrument(skip(self))]
    pub async fn reference_data(&self) -> Result<ReferenceData, ServiceError> {
        let mut session = self.repo.begin().await?;
        let outcome = async {
            Ok::<_, ServiceError>(ReferenceData {
                categories: session.top_categories().await?,
                colors: session.colors().await?,
                sizes: session.sizes().await?,
            })
        }
        .await;
        settle(session, outcome).await
    }

    #[instrument(skip(self))]
    pub async fn sub_categories(&self, parent_id: i32) -> Result<Vec<CategoryView>, ServiceError> {
        let mut session = self.repo.begin().await?;
        let outcome = async {
            if session.find_category(parent_id).await?.is_none() {
                return Err(ServiceError::not_found("category"));
            }
            let subs = session.sub_categories(parent_id).await?;
            if subs.is_empty() {
                return Err(ServiceError::NotFound(format!("category {parent_id} has no sub categories")));
            }
            Ok::<_, ServiceError>(subs)
        }
        .await;
        settle(session, outcome).await
    }

    /// Create a product with its options and return the new id.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn register(&self, seller_id: Uuid, input: ProductInput) -> Result<Uuid, ServiceError> {
        let mut session = self.repo.begin().await?;
        let outcome = async {
            validate_input(session.as_mut(), &input).await?;
            let id = Uuid::new_v4();
            let record = ProductRecord::from_input(id, seller_id, code_number_for(id), input);
            session.insert_product(&record).await?;
            Ok::<_, ServiceError>(id)
        }
        .await;
        let id = settle(session, outcome).await?;
        info!(product_id = %id, seller_id = %seller_id, "product registered");
        Ok(id)
    }

    /// Load one of the seller's products for the edit form.
    #[instrument(skip(self))]
    pub async fn get_for_edit(&self, seller_id: Uuid, product_id: Uuid) -> Result<ProductDetail, ServiceError> {
        let mut session = self.repo.begin().await?;
        let outcome = session
            .find_product(seller_id, product_id)
            .await
            .and_then(|found| found.ok_or_else(|| ServiceError::not_found("product")));
        settle(session, outcome).await
    }

    /// Overwrite a product and replace its options. The code number is kept.
    #[instrument(skip(self, input))]
    pub async fn update(&self, seller_id: Uuid, product_id: Uuid, input: ProductInput) -> Result<(), ServiceError> {
        let mut session = self.repo.begin().await?;
        let outcome = async {
            let existing = session
                .find_product(seller_id, product_id)
                .await?
                .ok_or_else(|| ServiceError::not_found("product"))?;
            validate_input(session.as_mut(), &input).await?;
            let record = ProductRecord::from_input(product_id, seller_id, existing.code_number, input);
            session.update_product(&record).await
        }
        .await;
        settle(session, outcome).await?;
        info!(product_id = %product_id, seller_id = %seller_id, "product updated");
        Ok(())
    }

    /// Filtered, paginated product list, newest first.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        seller_id: Uuid,
        filter: &ProductFilter,
        page: Pagination,
    ) -> Result<ProductPage, ServiceError> {
        let mut session = self.repo.begin().await?;
        let outcome = session.list_products(seller_id).await;
        let all = settle(session, outcome).await?;
        let matched = filter.apply(all);
        let total = matched.len();
        Ok(ProductPage { product_list: page.slice(matched), total })
    }
}

/// Domain checks that need the reference tables.
async fn validate_input(session: &mut dyn ProductSession, input: &ProductInput) -> Result<(), ServiceError> {
    product::validate_name(&input.name)?;
    if input.product_number.trim().is_empty() {
        return Err(ServiceError::Validation("product_number must not be empty".into()));
    }
    if input.main_image.trim().is_empty() {
        return Err(ServiceError::Validation("main_image must not be empty".into()));
    }
    product::validate_price(input.price)?;
    product::validate_discount_rate(input.discount_rate)?;
    product::validate_discount_period(input.discount_start, input.discount_end)?;
    product::validate_sale_range(input.minimum_sale, input.maximum_sale)?;

    match session.find_category(input.category_id).await? {
        Some(c) if c.parent_id.is_some() => {}
        Some(_) => {
            return Err(ServiceError::Validation(format!(
                "category {} is not a sub category",
                input.category_id
            )))
        }
        None => return Err(ServiceError::Validation(format!("unknown category {}", input.category_id))),
    }

    if input.options.is_empty() {
        return Err(ServiceError::Validation("options must not be empty".into()));
    }
    let colors: HashSet<i32> = session.colors().await?.into_iter().map(|c| c.id).collect();
    let sizes: HashSet<i32> = session.sizes().await?.into_iter().map(|s| s.id).collect();
    let mut seen = HashSet::new();
    for opt in &input.options {
        if !colors.contains(&opt.color_id) {
            return Err(ServiceError::Validation(format!("unknown color {}", opt.color_id)));
        }
        if !sizes.contains(&opt.size_id) {
            return Err(ServiceError::Validation(format!("unknown size {}", opt.size_id)));
        }
        if !seen.insert((opt.color_id, opt.size_id)) {
            return Err(ServiceError::Validation(format!(
                "duplicate option color {} / size {}",
                opt.color_id, opt.size_id
            )));
        }
        product_option::validate_stock(opt.stock)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repo::memory::InMemoryProductRepository;
    use serde_json::json;

    fn input(overrides: serde_json::Value) -> ProductInput {
        let mut body = json!({
            "category_id": 102, "name": "Linen shirt", "product_number": "LS-01",
            "main_image": "https://img/ls.jpg", "price": 39000,
            "is_sell": 1, "is_discount": 0, "is_display": 1,
            "options": [{"color_id": 1, "size_id": 3, "stock": 5}, {"color_id": 2, "size_id": 3}]
        });
        if let (Some(dst), Some(src)) = (body.as_object_mut(), overrides.as_object()) {
            for (k, v) in src {
                dst.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(body).unwrap()
    }

    fn setup() -> (Arc<InMemoryProductRepository>, ProductService) {
        let repo = Arc::new(InMemoryProductRepository::with_reference_data());
        let svc = ProductService::new(repo.clone());
        (repo, svc)
    }

    #[tokio::test]
    async fn register_then_load_for_edit() {
        let (repo, svc) = setup();
        let seller = Uuid::new_v4();
        let id = svc.register(seller, input(json!({}))).await.unwrap();

        let detail = svc.get_for_edit(seller, id).await.unwrap();
        assert_eq!(detail.name, "Linen shirt");
        assert_eq!(detail.code_number, code_number_for(id));
        assert_eq!(detail.options.len(), 2);
        assert_eq!(detail.options[0].stock, Some(5));

        let stats = repo.stats();
        assert_eq!(stats.committed(), 2);
        assert_eq!(stats.open(), 0);
    }

    #[tokio::test]
    async fn other_sellers_cannot_see_a_product() {
        let (_repo, svc) = setup();
        let id = svc.register(Uuid::new_v4(), input(json!({}))).await.unwrap();
        let err = svc.get_for_edit(Uuid::new_v4(), id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn domain_violations_roll_back() {
        let (repo, svc) = setup();
        let seller = Uuid::new_v4();
        let cases = [
            json!({"category_id": 1}),
            json!({"category_id": 999}),
            json!({"options": [{"color_id": 99, "size_id": 1}]}),
            json!({"options": [{"color_id": 1, "size_id": 99}]}),
            json!({"options": [{"color_id": 1, "size_id": 1}, {"color_id": 1, "size_id": 1}]}),
            json!({"options": []}),
            json!({"minimum_sale": 5, "maximum_sale": 2}),
            json!({"discount_rate": 120}),
            json!({"price": -1}),
            json!({"name": "  "}),
        ];
        for case in cases.iter() {
            let err = svc.register(seller, input(case.clone())).await.unwrap_err();
            assert_eq!(err.status_code(), 400, "{case}");
        }
        let stats = repo.stats();
        assert_eq!(stats.rolled_back(), cases.len());
        assert_eq!(stats.committed(), 0);
        assert_eq!(repo.committed_count().await, 0);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_options() {
        let (repo, svc) = setup();
        let seller = Uuid::new_v4();
        let id = svc.register(seller, input(json!({}))).await.unwrap();
        let before = repo.committed_product(id).await.unwrap();

        let edit = input(json!({"name": "Linen shirt v2", "price": 35000,
            "options": [{"color_id": 5, "size_id": 4, "stock": 2}]}));
        svc.update(seller, id, edit).await.unwrap();

        let after = repo.committed_product(id).await.unwrap();
        assert_eq!(after.name, "Linen shirt v2");
        assert_eq!(after.price, 35000);
        assert_eq!(after.code_number, before.code_number);
        assert_eq!(after.options.len(), 1);
        assert_eq!((after.options[0].color_id, after.options[0].size_id), (5, 4));
    }

    #[tokio::test]
    async fn failed_update_leaves_no_partial_write() {
        let (repo, svc) = setup();
        let seller = Uuid::new_v4();
        let id = svc.register(seller, input(json!({}))).await.unwrap();
        let before = repo.committed_product(id).await.unwrap();

        repo.fail_writes(true);
        let err = svc.update(seller, id, input(json!({"name": "changed", "price": 1}))).await.unwrap_err();
        assert_eq!(err.status_code(), 500);

        assert_eq!(repo.committed_product(id).await.unwrap(), before);
        assert_eq!(repo.stats().rolled_back(), 1);
        assert_eq!(repo.stats().open(), 0);
    }

    #[tokio::test]
    async fn update_of_missing_product_is_not_found() {
        let (_repo, svc) = setup();
        let err = svc.update(Uuid::new_v4(), Uuid::new_v4(), input(json!({}))).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn sub_categories_of_known_and_unknown_parents() {
        let (_repo, svc) = setup();
        let subs = svc.sub_categories(1).await.unwrap();
        assert!(subs.iter().all(|c| c.parent_id == Some(1)));
        assert_eq!(svc.sub_categories(42).await.unwrap_err().status_code(), 404);
        assert_eq!(svc.sub_categories(101).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn reference_data_lists_top_categories_only() {
        let (_repo, svc) = setup();
        let data = svc.reference_data().await.unwrap();
        assert!(data.categories.iter().all(|c| c.parent_id.is_none()));
        assert!(!data.colors.is_empty());
        assert!(!data.sizes.is_empty());
    }

    #[tokio::test]
    async fn oversized_price_is_rejected_and_listing_still_works() {
        let (repo, svc) = setup();
        let seller = Uuid::new_v4();
        let huge = input(json!({"price": 4_611_686_018_427_387_904_i64, "is_discount": 1, "discount_rate": 10}));
        assert_eq!(svc.register(seller, huge).await.unwrap_err().status_code(), 400);

        svc.register(seller, input(json!({"price": models::product::MAX_PRICE, "is_discount": 1, "discount_rate": 10})))
            .await
            .unwrap();
        let mut legacy = ProductRecord::from_input(
            Uuid::new_v4(),
            seller,
            "PLEGACY".into(),
            input(json!({"is_discount": 1, "discount_rate": 10})),
        );
        legacy.price = i64::MAX;
        repo.insert_at(legacy, "2024-03-01T10:00:00+09:00".parse().unwrap()).await;

        let page = svc.list(seller, &ProductFilter::default(), Pagination::new(None, None)).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.product_list[0].discounted_price, 900_000_000_000);
        assert_eq!(page.product_list[1].discounted_price, 8_301_034_833_169_298_226);
    }

    #[tokio::test]
    async fn list_filters_then_paginates() {
        let (_repo, svc) = setup();
        let seller = Uuid::new_v4();
        for i in 0..15 {
            let flag = if i % 3 == 0 { 1 } else { 0 };
            svc.register(seller, input(json!({"name": format!("item-{i}"), "is_discount": flag, "discount_rate": 10})))
                .await
                .unwrap();
        }
        let all = svc.list(seller, &ProductFilter::default(), Pagination::new(None, None)).await.unwrap();
        assert_eq!(all.total, 15);
        assert_eq!(all.product_list.len(), 10);

        let discounted = ProductFilter { is_discount: Some(true), ..Default::default() };
        let page = svc.list(seller, &discounted, Pagination::new(Some(3), Some(10))).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.product_list.len(), 2);
        assert!(page.product_list.iter().all(|p| p.is_discount && p.discounted_price == 35100));

        let beyond = svc.list(seller, &discounted, Pagination::new(Some(50), None)).await.unwrap();
        assert_eq!(beyond.total, 5);
        assert!(beyond.product_list.is_empty());
    }
}
