use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct SignupRequest { pub account: String, pub password: String, pub brand_name: String }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub account: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct ProductOptionRequest {
    pub color_id: i32,
    pub size_id: i32,
    /// null when stock is not managed
    pub stock: Option<i32>,
}

/// Body of product registration and update. Flags accept `0`/`1` or booleans.
#[derive(utoipa::ToSchema)]
pub struct ProductRequest {
    pub category_id: i32,
    pub name: String,
    pub product_number: String,
    pub description: Option<String>,
    pub main_image: String,
    pub price: i64,
    pub discount_rate: Option<i32>,
    pub discount_start: Option<String>,
    pub discount_end: Option<String>,
    pub minimum_sale: Option<i32>,
    pub maximum_sale: Option<i32>,
    pub is_sell: bool,
    pub is_discount: bool,
    pub is_display: bool,
    pub options: Vec<ProductOptionRequest>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::sellers::signup,
        crate::routes::sellers::login,
        crate::routes::sellers::logout,
        crate::routes::products::registration_form,
        crate::routes::products::register,
        crate::routes::products::sub_categories,
        crate::routes::products::edit_form,
        crate::routes::products::update,
        crate::routes::products::management,
    ),
    components(
        schemas(
            HealthResponse,
            SignupRequest,
            LoginRequest,
            ProductOptionRequest,
            ProductRequest,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "seller"),
        (name = "product")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_product_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/product/register", "/product/update/{product_id}", "/product/management", "/category/{category_id}"] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
