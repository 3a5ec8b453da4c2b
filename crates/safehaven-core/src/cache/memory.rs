//! In-process [`LocalCache`] backed by a hash map.
//!
//! Nothing survives the process. Used for ephemeral CLI sessions and tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use safehaven_types::error::CacheError;

use super::LocalCache;

/// Hash-map cache. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCache {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LocalCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let map = self
            .entries
            .lock()
            .map_err(|e| CacheError::Backend(format!("cache lock poisoned: {e}")))?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut map = self
            .entries
            .lock()
            .map_err(|e| CacheError::Backend(format!("cache lock poisoned: {e}")))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let cache = InMemoryCache::new();
        cache.set("k", "[1,2]").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let cache = InMemoryCache::new();
        assert!(cache.get("missing").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = InMemoryCache::new();
        let other = cache.clone();
        cache.set("a", "1").await.unwrap();
        assert_eq!(other.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(other.len(), 1);
    }
}
