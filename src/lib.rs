#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::core::client::ProductClient;
pub use crate::core::search_page::SearchPage;
pub use crate::utils::error::{Result, ShopError};
