use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use service::product::ProductService;
use service::seller::SellerService;

use crate::errors::JsonApiError;

/// Cookie carrying the access token for browser clients.
pub const TOKEN_COOKIE: &str = "access_token";

#[derive(Clone)]
pub struct ServerState {
    pub products: ProductService,
    pub sellers: SellerService,
}

/// Bearer token from `Authorization`, falling back to the token cookie.
fn extract_token(req: &Request) -> Result<String, JsonApiError> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION) {
        let value = h.to_str().map_err(|_| JsonApiError::unauthorized("malformed Authorization header"))?;
        return match value.strip_prefix("Bearer ") {
            Some(tok) if !tok.trim().is_empty() => Ok(tok.trim().to_string()),
            _ => Err(JsonApiError::unauthorized("Authorization must be 'Bearer <token>'")),
        };
    }
    // 回退：从 Cookie 中读取 access_token
    CookieJar::from_headers(req.headers())
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| JsonApiError::unauthorized("missing access token"))
}

/// 路由中间件：校验 token，并把 SellerContext 注入请求扩展
pub async fn require_seller(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let token = extract_token(&req).inspect_err(|_| tracing::warn!(path = %path, "request without token"))?;
    let seller = state.sellers.authenticate(&token).map_err(|e| {
        tracing::warn!(path = %path, err = %e, "token validation failed");
        JsonApiError::unauthorized("invalid or expired token")
    })?;
    req.extensions_mut().insert(seller);
    Ok(next.run(req).await)
}
