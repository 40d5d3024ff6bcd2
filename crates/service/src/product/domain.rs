use chrono::{DateTime, FixedOffset};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub type Timestamp = DateTime<FixedOffset>;

/// Keys that must be present (and non-null) in a register/update body.
pub const PRODUCT_REQUIRED_FIELDS: &[&str] = &[
    "category_id",
    "name",
    "product_number",
    "main_image",
    "price",
    "is_sell",
    "is_display",
    "is_discount",
    "options",
];

/// Keys that must be present in every element of `options`.
pub const OPTION_REQUIRED_FIELDS: &[&str] = &["color_id", "size_id"];

fn default_minimum_sale() -> i32 { 1 }
fn default_maximum_sale() -> i32 { 20 }

/// Body of a product registration or update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub category_id: i32,
    pub name: String,
    pub product_number: String,
    #[serde(default)]
    pub description: Option<String>,
    pub main_image: String,
    pub price: i64,
    #[serde(default)]
    pub discount_rate: i32,
    #[serde(default)]
    pub discount_start: Option<Timestamp>,
    #[serde(default)]
    pub discount_end: Option<Timestamp>,
    #[serde(default = "default_minimum_sale")]
    pub minimum_sale: i32,
    #[serde(default = "default_maximum_sale")]
    pub maximum_sale: i32,
    #[serde(deserialize_with = "de_flag")]
    pub is_sell: bool,
    #[serde(deserialize_with = "de_flag")]
    pub is_discount: bool,
    #[serde(deserialize_with = "de_flag")]
    pub is_display: bool,
    pub options: Vec<OptionInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionInput {
    pub color_id: i32,
    pub size_id: i32,
    #[serde(default)]
    pub stock: Option<i32>,
}

/// Parse the `0`/`1`/`true`/`false` flag encoding used by the panel.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
}

fn de_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(b) => Ok(b),
        FlagRepr::Int(0) => Ok(false),
        FlagRepr::Int(1) => Ok(true),
        FlagRepr::Int(n) => Err(de::Error::custom(format!("flag must be 0 or 1, got {n}"))),
        FlagRepr::Text(s) => parse_flag(&s).ok_or_else(|| de::Error::custom(format!("invalid flag '{s}'"))),
    }
}

/// Row-shaped product as written by a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub category_id: i32,
    pub name: String,
    pub code_number: String,
    pub product_number: String,
    pub description: Option<String>,
    pub main_image: String,
    pub price: i64,
    pub discount_rate: i32,
    pub discount_start: Option<Timestamp>,
    pub discount_end: Option<Timestamp>,
    pub minimum_sale: i32,
    pub maximum_sale: i32,
    pub is_sell: bool,
    pub is_discount: bool,
    pub is_display: bool,
    pub options: Vec<OptionRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionRecord {
    pub id: Uuid,
    pub color_id: i32,
    pub size_id: i32,
    pub stock: Option<i32>,
}

impl ProductRecord {
    pub fn from_input(id: Uuid, seller_id: Uuid, code_number: String, input: ProductInput) -> Self {
        let options = input
            .options
            .into_iter()
            .map(|o| OptionRecord { id: Uuid::new_v4(), color_id: o.color_id, size_id: o.size_id, stock: o.stock })
            .collect();
        Self {
            id,
            seller_id,
            category_id: input.category_id,
            name: input.name.trim().to_string(),
            code_number,
            product_number: input.product_number.trim().to_string(),
            description: input.description,
            main_image: input.main_image,
            price: input.price,
            discount_rate: input.discount_rate,
            discount_start: input.discount_start,
            discount_end: input.discount_end,
            minimum_sale: input.minimum_sale,
            maximum_sale: input.maximum_sale,
            is_sell: input.is_sell,
            is_discount: input.is_discount,
            is_display: input.is_display,
            options,
        }
    }
}

/// Seller-facing product code derived from the product id.
pub fn code_number_for(id: Uuid) -> String {
    let hex = id.simple().to_string();
    format!("P{}", hex[..12].to_ascii_uppercase())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorView {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeView {
    pub id: i32,
    pub name: String,
}

/// Lookup data for the registration form.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceData {
    pub categories: Vec<CategoryView>,
    pub colors: Vec<ColorView>,
    pub sizes: Vec<SizeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    pub id: Uuid,
    pub color_id: i32,
    pub size_id: i32,
    pub stock: Option<i32>,
}

/// A product as loaded into the edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub category_id: i32,
    pub name: String,
    pub code_number: String,
    pub product_number: String,
    pub description: Option<String>,
    pub main_image: String,
    pub price: i64,
    pub discount_rate: i32,
    pub discount_start: Option<Timestamp>,
    pub discount_end: Option<Timestamp>,
    pub minimum_sale: i32,
    pub maximum_sale: i32,
    pub is_sell: bool,
    pub is_discount: bool,
    pub is_display: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub options: Vec<OptionView>,
}

/// One row of the management list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub code_number: String,
    pub product_number: String,
    pub main_image: String,
    pub brand: String,
    pub price: i64,
    pub discount_rate: i32,
    pub discounted_price: i64,
    pub is_sell: bool,
    pub is_discount: bool,
    pub is_display: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub product_list: Vec<ProductSummary>,
    pub total: usize,
}
