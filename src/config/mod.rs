pub mod toml_config;

use crate::config::toml_config::TomlConfig;
use crate::domain::model::{SortOrder, DEFAULT_MAX_PRICE, PRICE_FILTER_MAX, PRICE_FILTER_MIN};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{
    validate_file_extension, validate_positive_number, validate_range, validate_url, Validate,
};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

#[derive(Debug, Clone, Parser)]
#[command(name = "shop-search")]
#[command(about = "Search the product catalog of a storefront server")]
pub struct CliConfig {
    /// Store server base URL
    #[arg(long, env = "SERVER_URL")]
    pub server_url: Option<String>,

    /// Free-text search term
    #[arg(long, default_value = "")]
    pub search: String,

    /// Sort by price: asc or desc
    #[arg(long)]
    pub sort: Option<SortOrder>,

    /// Maximum price filter
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Category filter
    #[arg(long)]
    pub category: Option<String>,

    /// Result page, 1-based
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Add the product with this id from the result page to the cart
    #[arg(long)]
    pub add: Option<String>,

    /// Write the result page to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Lifetime of cached responses in seconds
    #[arg(long)]
    pub cache_ttl_seconds: Option<u64>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Fills unset values from a config file. Command-line flags and the
    /// environment win over the file.
    pub fn merge_file(&mut self, file: &TomlConfig) -> Result<()> {
        if let Some(server) = &file.server {
            if self.server_url.is_none() {
                self.server_url = server.base_url.clone();
            }
            if self.timeout_seconds.is_none() {
                self.timeout_seconds = server.timeout_seconds;
            }
            if self.cache_ttl_seconds.is_none() {
                self.cache_ttl_seconds = server.cache_ttl_seconds;
            }
        }
        if let Some(search) = &file.search {
            if self.max_price.is_none() {
                self.max_price = search.max_price;
            }
            if self.category.is_none() {
                self.category = search.category.clone();
            }
            if self.sort.is_none() {
                if let Some(sort) = &search.sort {
                    self.sort = Some(sort.parse().map_err(|reason| {
                        ShopError::InvalidConfigValueError {
                            field: "search.sort".to_string(),
                            value: sort.clone(),
                            reason,
                        }
                    })?);
                }
            }
        }
        Ok(())
    }

    pub fn effective_max_price(&self) -> u32 {
        self.max_price.unwrap_or(DEFAULT_MAX_PRICE)
    }
}

impl ConfigProvider for CliConfig {
    fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or("")
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn cache_ttl_seconds(&self) -> u64 {
        self.cache_ttl_seconds.unwrap_or(DEFAULT_CACHE_TTL_SECONDS)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let server_url = self.server_url.as_deref().ok_or(ShopError::MissingConfigError {
            field: "server_url".to_string(),
        })?;
        validate_url("server_url", server_url)?;
        validate_positive_number("page", self.page as usize, 1)?;
        validate_range(
            "max_price",
            self.effective_max_price(),
            PRICE_FILTER_MIN,
            PRICE_FILTER_MAX,
        )?;
        validate_positive_number("timeout_seconds", self.timeout_seconds() as usize, 1)?;
        if let Some(export) = &self.export {
            validate_file_extension("export", &export.to_string_lossy(), &["csv"])?;
        }
        Ok(())
    }
}
