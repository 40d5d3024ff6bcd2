use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use serde_json::json;
use service::pagination::Pagination;
use service::product::repo::memory::InMemoryProductRepository;
use service::product::{ProductFilter, ProductInput, ProductService};

fn bench_listing(c: &mut Criterion) {
    let repo = Arc::new(InMemoryProductRepository::with_reference_data());
    let svc = ProductService::new(repo);
    let seller = uuid::Uuid::new_v4();

    // fill the catalog outside of the measured section
    let rt = tokio::runtime::Runtime::new().unwrap();
    for i in 0..500 {
        let input: ProductInput = serde_json::from_value(json!({
            "category_id": 102, "name": format!("item-{}", i % 20), "product_number": format!("N-{i}"),
            "main_image": "https://img/b.jpg", "price": 1000 + i,
            "is_sell": i % 2, "is_discount": i % 3 == 0, "is_display": 1,
            "options": [{"color_id": 1, "size_id": 1}]
        }))
        .unwrap();
        rt.block_on(svc.register(seller, input)).unwrap();
    }

    let filter = ProductFilter { is_sell: Some(true), is_discount: Some(true), ..Default::default() };
    c.bench_function("product_list_filter_page", |b| {
        b.iter(|| {
            let page = rt.block_on(svc.list(seller, &filter, Pagination::new(Some(10), Some(20)))).unwrap();
            criterion::black_box(page.total);
        });
    });
}

criterion_group!(benches, bench_listing);
criterion_main!(benches);
