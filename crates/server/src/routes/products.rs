use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use common::types::MessageBody;
use service::product::domain::{OPTION_REQUIRED_FIELDS, PRODUCT_REQUIRED_FIELDS};
use service::product::{ProductDetail, ProductInput, ProductListQuery, ProductPage, ReferenceData};
use service::seller::SellerContext;
use service::validation::{decode, require_fields, require_nested_fields};

use super::auth::ServerState;
use crate::errors::JsonApiError;

#[derive(Serialize)]
pub struct RegisterOutput {
    pub message: &'static str,
    pub product_id: Uuid,
}

/// Presence checks first, then typed decoding; both fail with 400.
fn parse_product_body(body: Result<Json<Value>, JsonRejection>) -> Result<ProductInput, JsonApiError> {
    let Json(body) = body?;
    require_fields(&body, PRODUCT_REQUIRED_FIELDS)?;
    require_nested_fields(&body, "options", OPTION_REQUIRED_FIELDS)?;
    Ok(decode(body)?)
}

fn path_param<T>(p: Result<Path<T>, PathRejection>) -> Result<T, JsonApiError> {
    p.map(|Path(v)| v).map_err(|e| JsonApiError::bad_request(format!("INVALID_REQUEST: {}", e.body_text())))
}

#[utoipa::path(
    get, path = "/product/register", tag = "product",
    responses(
        (status = 200, description = "Top-level categories, colors and sizes"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer" = []))
)]
pub async fn registration_form(State(state): State<ServerState>) -> Result<Json<ReferenceData>, JsonApiError> {
    Ok(Json(state.products.reference_data().await?))
}

#[utoipa::path(
    post, path = "/product/register", tag = "product",
    request_body = crate::openapi::ProductRequest,
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Registration failed")
    ),
    security(("bearer" = []))
)]
pub async fn register(
    State(state): State<ServerState>,
    Extension(seller): Extension<SellerContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RegisterOutput>, JsonApiError> {
    let input = parse_product_body(body)?;
    let product_id = state.products.register(seller.seller_id, input).await?;
    info!(%product_id, seller_id = %seller.seller_id, "product_register_ok");
    Ok(Json(RegisterOutput { message: "SUCCESS", product_id }))
}

#[utoipa::path(
    get, path = "/category/{category_id}", tag = "product",
    params(("category_id" = i32, Path, description = "Parent category id")),
    responses(
        (status = 200, description = "Sub categories"),
        (status = 404, description = "Unknown category or no sub categories")
    ),
    security(("bearer" = []))
)]
pub async fn sub_categories(
    State(state): State<ServerState>,
    category_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let category_id = path_param(category_id)?;
    let subs = state.products.sub_categories(category_id).await?;
    Ok(Json(json!({ "sub_categories": subs })))
}

#[utoipa::path(
    get, path = "/product/update/{product_id}", tag = "product",
    params(("product_id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with options"),
        (status = 404, description = "No such product for this seller")
    ),
    security(("bearer" = []))
)]
pub async fn edit_form(
    State(state): State<ServerState>,
    Extension(seller): Extension<SellerContext>,
    product_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ProductDetail>, JsonApiError> {
    let product_id = path_param(product_id)?;
    Ok(Json(state.products.get_for_edit(seller.seller_id, product_id).await?))
}

#[utoipa::path(
    put, path = "/product/update/{product_id}", tag = "product",
    params(("product_id" = Uuid, Path, description = "Product id")),
    request_body = crate::openapi::ProductRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Missing or invalid field"),
        (status = 404, description = "No such product for this seller"),
        (status = 500, description = "Update failed")
    ),
    security(("bearer" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(seller): Extension<SellerContext>,
    product_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let product_id = path_param(product_id)?;
    let input = parse_product_body(body)?;
    state.products.update(seller.seller_id, product_id, input).await?;
    Ok(Json(MessageBody::new("SUCCESS")))
}

#[utoipa::path(
    get, path = "/product/management", tag = "product",
    params(
        ("offset" = Option<usize>, Query, description = "Default 0"),
        ("limit" = Option<usize>, Query, description = "Default 10"),
        ("is_sell" = Option<String>, Query, description = "0 or 1"),
        ("is_discount" = Option<String>, Query, description = "0 or 1"),
        ("is_display" = Option<String>, Query, description = "0 or 1"),
        ("name" = Option<String>, Query,),
        ("code" = Option<String>, Query, description = "Code number, also accepted as code_number"),
        ("number" = Option<String>, Query, description = "Product number, also accepted as product_number"),
        ("brand" = Option<String>, Query,),
        ("start_date" = Option<String>, Query, description = "YYYY-MM-DD, inclusive"),
        ("end_date" = Option<String>, Query, description = "YYYY-MM-DD, inclusive")
    ),
    responses(
        (status = 200, description = "product_list and total"),
        (status = 400, description = "Malformed filter")
    ),
    security(("bearer" = []))
)]
pub async fn management(
    State(state): State<ServerState>,
    Extension(seller): Extension<SellerContext>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<ProductPage>, JsonApiError> {
    let Query(query) = query?;
    let (filter, page) = query.into_parts()?;
    Ok(Json(state.products.list(seller.seller_id, &filter, page).await?))
}
