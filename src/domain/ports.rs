use crate::domain::model::{CartAction, SearchQuery, SearchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Data source behind the search page. Implemented by the HTTP client;
/// tests substitute scripted sources.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
    async fn list_categories(&self) -> Result<Vec<String>>;
}

/// The external cart store, mutated only through dispatched actions.
pub trait CartStore: Send + Sync {
    fn dispatch(&self, action: CartAction);
}

/// Sink for transient user-facing notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn server_url(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn cache_ttl_seconds(&self) -> u64;
}
