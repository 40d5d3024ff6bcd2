use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signup input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupInput {
    pub account: String,
    pub password: String,
    pub brand_name: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub account: String,
    pub password: String,
}

/// Seller as seen by the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerAccount {
    pub id: Uuid,
    pub account: String,
    pub brand_name: String,
}

/// Stored password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub seller_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub seller: SellerAccount,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity attached to a request once its token checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerContext {
    pub seller_id: Uuid,
    pub account: String,
}
