//! Service flows against Postgres; skipped without a database.

use std::sync::Arc;

use serde_json::json;

use crate::pagination::Pagination;
use crate::product::repo::seaorm::SeaOrmProductRepository;
use crate::product::{ProductFilter, ProductInput, ProductService};
use crate::seller::repo::seaorm::SeaOrmSellerRepository;
use crate::seller::{AuthError, LoginInput, SellerService, SignupInput, TokenIssuer};
use crate::test_support::{get_db, unique_account};

fn input(name: &str, product_number: &str) -> ProductInput {
    serde_json::from_value(json!({
        "category_id": 102, "name": name, "product_number": product_number,
        "main_image": "https://img/p.jpg", "price": 12000,
        "is_sell": 1, "is_discount": 1, "is_display": 0, "discount_rate": 25,
        "options": [{"color_id": 1, "size_id": 2, "stock": 3}, {"color_id": 2, "size_id": 2}]
    }))
    .unwrap()
}

#[tokio::test]
async fn signup_login_and_duplicate_against_db() {
    let Some(db) = get_db().await else { return };
    let svc = SellerService::new(Arc::new(SeaOrmSellerRepository { db }), TokenIssuer::new("s", 12));
    let account = unique_account("db");
    let seller = svc
        .signup(SignupInput { account: account.clone(), password: "Passw0rd!".into(), brand_name: "DB Brand".into() })
        .await
        .unwrap();
    let login = svc.login(LoginInput { account: account.clone(), password: "Passw0rd!".into() }).await.unwrap();
    assert_eq!(login.seller.id, seller.id);

    let dup = svc
        .signup(SignupInput { account, password: "Passw0rd!".into(), brand_name: "x".into() })
        .await
        .unwrap_err();
    assert!(matches!(dup, AuthError::Conflict));
}

#[tokio::test]
async fn register_update_and_list_against_db() {
    let Some(db) = get_db().await else { return };
    let sellers = SellerService::new(Arc::new(SeaOrmSellerRepository { db: db.clone() }), TokenIssuer::new("s", 12));
    let seller = sellers
        .signup(SignupInput { account: unique_account("prod"), password: "Passw0rd!".into(), brand_name: "Atelier".into() })
        .await
        .unwrap();
    let products = ProductService::new(Arc::new(SeaOrmProductRepository { db }));

    let first = products.register(seller.id, input("Coat", "C-1")).await.unwrap();
    let second = products.register(seller.id, input("Scarf", "S-1")).await.unwrap();

    let page = products.list(seller.id, &ProductFilter::default(), Pagination::default()).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.product_list[0].id, second);
    assert!(page.product_list.iter().all(|p| p.brand == "Atelier" && p.discounted_price == 9000));

    products.update(seller.id, first, input("Wool coat", "C-1")).await.unwrap();
    let detail = products.get_for_edit(seller.id, first).await.unwrap();
    assert_eq!(detail.name, "Wool coat");
    assert_eq!(detail.options.len(), 2);

    let by_number = ProductFilter { product_number: Some("S-1".into()), ..Default::default() };
    let page = products.list(seller.id, &by_number, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.product_list[0].id, second);
}

#[tokio::test]
async fn invalid_option_leaves_product_untouched_in_db() {
    let Some(db) = get_db().await else { return };
    let sellers = SellerService::new(Arc::new(SeaOrmSellerRepository { db: db.clone() }), TokenIssuer::new("s", 12));
    let seller = sellers
        .signup(SignupInput { account: unique_account("rb"), password: "Passw0rd!".into(), brand_name: "RB".into() })
        .await
        .unwrap();
    let products = ProductService::new(Arc::new(SeaOrmProductRepository { db }));
    let id = products.register(seller.id, input("Bag", "B-1")).await.unwrap();

    let mut bad = input("Renamed", "B-1");
    bad.options[0].color_id = 9999;
    assert_eq!(products.update(seller.id, id, bad).await.unwrap_err().status_code(), 400);
    assert_eq!(products.get_for_edit(seller.id, id).await.unwrap().name, "Bag");
}
