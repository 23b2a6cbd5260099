use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Price slider bounds and default, as presented by the filter sidebar.
pub const PRICE_FILTER_MIN: u32 = 100;
pub const PRICE_FILTER_MAX: u32 = 100_000;
pub const DEFAULT_MAX_PRICE: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: u32,
    pub stock: u32,
    pub photo: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            // "dsc" is what the legacy storefront emitted for descending
            "desc" | "dsc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}', expected asc or desc", other)),
        }
    }
}

/// Arguments of the search endpoint. `price`, `sort` and `category` are
/// appended to the query string only when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub search: String,
    pub page: u32,
    pub price: Option<u32>,
    pub sort: Option<SortOrder>,
    pub category: Option<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            price: None,
            sort: None,
            category: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub products: Vec<Product>,
    pub total_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetailsResponse {
    pub product: Product,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub price: u32,
    pub stock: u32,
    pub quantity: u32,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            quantity,
        }
    }
}

/// Actions dispatched to the external cart store. The store is never
/// mutated directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Add(CartItem),
}

/// Multipart payload for creating a product.
#[derive(Debug, Clone)]
pub struct NewProductForm {
    pub name: String,
    pub price: u32,
    pub stock: u32,
    pub category: String,
    pub photo: PathBuf,
}

/// Multipart payload for updating a product. Unset fields are left out of
/// the form and keep their server-side value.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductForm {
    pub name: Option<String>,
    pub price: Option<u32>,
    pub stock: Option<u32>,
    pub category: Option<String>,
    pub photo: Option<PathBuf>,
}
