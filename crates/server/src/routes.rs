use std::time::Instant;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::metrics::{encode_metrics, observe_response};
use common::types::Health;

use crate::openapi::ApiDoc;

pub mod auth;
pub mod products;
pub mod sellers;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> impl IntoResponse {
    encode_metrics()
}

/// Count every request and its latency by status class.
async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let resp = next.run(req).await;
    observe_response(resp.status().as_u16(), start.elapsed().as_secs_f64());
    resp
}

/// Build the full application router: public routes, seller routes and the
/// token-gated product routes.
pub fn build_router(state: auth::ServerState, cors: CorsLayer) -> Router {
    // Public routes (health, metrics, docs)
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let seller_routes = Router::new()
        .route("/seller/signup", post(sellers::signup))
        .route("/seller/login", post(sellers::login))
        .route("/seller/logout", post(sellers::logout));

    // Product routes require a seller token
    let product_routes = Router::new()
        .route("/product/register", get(products::registration_form).post(products::register))
        .route("/category/:category_id", get(products::sub_categories))
        .route("/product/update/:product_id", get(products::edit_form).put(products::update))
        .route("/product/management", get(products::management))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_seller));

    public
        .merge(seller_routes)
        .merge(product_routes)
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
