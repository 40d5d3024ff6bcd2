pub mod errors;
pub mod db;
pub mod seller;
pub mod seller_credentials;
pub mod category;
pub mod color;
pub mod size;
pub mod product;
pub mod product_option;

#[cfg(test)]
mod tests;
