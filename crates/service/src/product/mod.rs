//! Product registration, editing and listing.

pub mod domain;
pub mod filter;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{ProductDetail, ProductInput, ProductPage, ReferenceData};
pub use filter::{ProductFilter, ProductListQuery};
pub use repository::{ProductRepository, ProductSession};
pub use service::ProductService;
