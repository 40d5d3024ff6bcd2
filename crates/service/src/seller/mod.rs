//! Seller accounts: signup, password login and access tokens.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use domain::{LoginInput, LoginResult, SellerAccount, SellerContext, SignupInput};
pub use errors::AuthError;
pub use repository::SellerRepository;
pub use service::SellerService;
pub use token::TokenIssuer;
