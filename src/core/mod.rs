pub mod cache;
pub mod client;
pub mod search_page;

pub use crate::domain::model::{CartAction, CartItem, Product, SearchQuery, SearchResponse, SortOrder};
pub use crate::domain::ports::{CartStore, ConfigProvider, Notifier, ProductSource};
pub use crate::utils::error::Result;
