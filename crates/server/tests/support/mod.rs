#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use server::{build_router, ServerState};
use service::product::repo::memory::InMemoryProductRepository;
use service::product::ProductService;
use service::seller::repository::mock::MockSellerRepository;
use service::seller::{SellerAccount, SellerService, TokenIssuer};

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub products: Arc<InMemoryProductRepository>,
}

pub fn app() -> TestApp {
    let products = Arc::new(InMemoryProductRepository::with_reference_data());
    let state = ServerState {
        products: ProductService::new(products.clone()),
        sellers: SellerService::new(Arc::new(MockSellerRepository::default()), TokenIssuer::new(SECRET, 12)),
    };
    TestApp { router: build_router(state, tower_http::cors::CorsLayer::very_permissive()), products }
}

/// Token for a seller that exists only in the token, plus its id.
pub fn seller_token() -> (Uuid, String) {
    let seller = SellerAccount { id: Uuid::new_v4(), account: "tester".into(), brand_name: "Tester".into() };
    let (token, _) = TokenIssuer::new(SECRET, 12).issue(&seller).unwrap();
    (seller.id, token)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value, axum::http::HeaderMap) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, body, headers)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    b.body(Body::empty()).unwrap()
}

pub fn with_json(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut b = Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = token {
        b = b.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    b.body(Body::from(serde_json::to_vec(body).unwrap())).unwrap()
}
