use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Invalidation keys attached to cached responses. Tags are per entity:
/// a mutation touching one product must not force every unrelated cached
/// read to refetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    ProductList,
    Product(String),
    CategoryList,
}

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    tags: Vec<Tag>,
    fetched_at: DateTime<Utc>,
}

/// In-memory response cache keyed by request URL (the argument identity of
/// a query). Entries expire after the TTL and are dropped when a mutation
/// invalidates one of their tags.
#[derive(Debug)]
pub struct QueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_seconds as i64),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if Utc::now() - entry.fetched_at < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: String, value: Value, tags: Vec<Tag>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key,
            CacheEntry {
                value,
                tags,
                fetched_at: Utc::now(),
            },
        );
    }

    /// Drops every entry carrying at least one of the given tags and
    /// returns how many were removed.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|tag| tags.contains(tag)));
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!("invalidated {} cached response(s)", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
