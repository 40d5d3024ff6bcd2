use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use service::seller::{LoginInput, SignupInput};
use service::validation::{decode, require_fields};

use super::auth::{ServerState, TOKEN_COOKIE};
use crate::errors::JsonApiError;

const SIGNUP_FIELDS: &[&str] = &["account", "password", "brand_name"];
const LOGIN_FIELDS: &[&str] = &["account", "password"];

#[derive(Serialize)]
pub struct SignupOutput {
    pub message: &'static str,
    pub seller_id: Uuid,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub message: &'static str,
    pub seller_id: Uuid,
    pub brand_name: String,
    pub access_token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    /// seconds
    pub expires_in: i64,
}

#[utoipa::path(
    post, path = "/seller/signup", tag = "seller",
    request_body = crate::openapi::SignupRequest,
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Account exists")
    )
)]
pub async fn signup(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SignupOutput>, JsonApiError> {
    let Json(body) = body?;
    require_fields(&body, SIGNUP_FIELDS)?;
    let input: SignupInput = decode(body)?;
    let seller = state.sellers.signup(input).await?;
    Ok(Json(SignupOutput { message: "SUCCESS", seller_id: seller.id }))
}

#[utoipa::path(
    post, path = "/seller/login", tag = "seller",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in, token set as cookie"),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let Json(body) = body?;
    require_fields(&body, LOGIN_FIELDS)?;
    let input: LoginInput = decode(body)?;
    let login = state.sellers.login(input).await?;

    let mut cookie = Cookie::new(TOKEN_COOKIE, login.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    info!(seller_id = %login.seller.id, "login cookie issued");

    let out = LoginOutput {
        message: "SUCCESS",
        seller_id: login.seller.id,
        brand_name: login.seller.brand_name,
        access_token: login.token,
        expires_at: login.expires_at,
        expires_in: state.sellers.token_ttl_secs(),
    };
    Ok((jar.add(cookie), Json(out)))
}

#[utoipa::path(post, path = "/seller/logout", tag = "seller", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.remove(Cookie::from(TOKEN_COOKIE)), StatusCode::NO_CONTENT)
}
