//! Service layer of the seller panel.
//! - Separates business logic from data access: each area exposes a
//!   repository trait with a SeaORM implementation and an in-memory one.
//! - Reuses validation and entity definitions in `models` crate.
//! - Framework independent; the `server` crate maps errors to HTTP.

pub mod errors;
pub mod pagination;
pub mod product;
pub mod seller;
pub mod validation;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod db_tests;
