use crate::domain::model::{PRICE_FILTER_MAX, PRICE_FILTER_MIN};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based configuration. Every field is optional; values only fill in
/// what the command line left unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub search: Option<SearchSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub cache_ttl_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSection {
    pub max_price: Option<u32>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl TomlConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(server) = &self.server {
            if let Some(base_url) = &server.base_url {
                validate_url("server.base_url", base_url)?;
            }
        }
        if let Some(search) = &self.search {
            if let Some(max_price) = search.max_price {
                validate_range("search.max_price", max_price, PRICE_FILTER_MIN, PRICE_FILTER_MAX)?;
            }
        }
        Ok(())
    }
}
