//! Local key-value cache trait and the fixed set of collections stored in it.
//!
//! The cache holds whole serialized collections under a small set of keys;
//! there is no partial-record access.

pub mod memory;

use safehaven_types::error::CacheError;
use std::fmt;

/// Trait for the durable local key-value store.
///
/// Values are raw serialized text. Uses RPITIT (native async fn in traits,
/// Rust 2024 edition). Implementations live in safehaven-infra, plus the
/// in-process [`memory::InMemoryCache`].
pub trait LocalCache: Send + Sync {
    /// Get the raw value stored under `key`. Returns None if absent.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, CacheError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), CacheError>> + Send;
}

/// The logical collections kept in the local cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Posts,
    Reports,
    AidRequests,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Posts,
        Collection::Reports,
        Collection::AidRequests,
    ];

    /// Storage key for this collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Posts => "safehaven_posts",
            Collection::Reports => "safehaven_reports",
            Collection::AidRequests => "safehaven_donations",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Posts => write!(f, "posts"),
            Collection::Reports => write!(f, "reports"),
            Collection::AidRequests => write!(f, "aid-requests"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys_are_distinct() {
        let keys: std::collections::HashSet<_> = Collection::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), Collection::ALL.len());
    }

    #[test]
    fn test_collection_display() {
        assert_eq!(Collection::AidRequests.to_string(), "aid-requests");
        assert_eq!(Collection::Posts.key(), "safehaven_posts");
    }
}
