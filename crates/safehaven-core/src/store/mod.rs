//! Resilient store facade.
//!
//! `StoreFacade` gives the application one API per record family regardless
//! of backend availability. Every operation goes to the [`RemoteClient`]
//! first; when the backend cannot serve it, the equivalent operation runs
//! against the [`LocalCache`]. A single call never mixes remote and local
//! results.
//!
//! Local collections are rewritten whole on every mutation. Each collection
//! has its own async mutex held across the read-modify-write so concurrent
//! writers cannot lose updates.

pub mod access_code;
pub mod account;
pub mod aid;
pub mod posts;
pub mod reports;
pub mod seed;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use safehaven_types::config::HavenConfig;
use safehaven_types::error::{RemoteError, StoreError};

use crate::cache::{Collection, LocalCache};
use crate::remote::RemoteClient;

/// Timing knobs for the facade.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Upper bound on a single remote call; expiry counts as unavailability.
    pub remote_timeout: Duration,
    /// Simulated latency for local aid request submission.
    pub aid_submit_delay: Duration,
    /// Simulated latency for offline login/registration.
    pub offline_auth_delay: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&HavenConfig::default())
    }
}

impl From<&HavenConfig> for StoreOptions {
    fn from(config: &HavenConfig) -> Self {
        Self {
            remote_timeout: Duration::from_millis(config.remote_timeout_ms),
            aid_submit_delay: Duration::from_millis(config.aid_submit_delay_ms),
            offline_auth_delay: Duration::from_millis(config.offline_auth_delay_ms),
        }
    }
}

impl StoreOptions {
    /// Options with no artificial delays and the given remote timeout.
    pub fn immediate(remote_timeout: Duration) -> Self {
        Self {
            remote_timeout,
            aid_submit_delay: Duration::ZERO,
            offline_auth_delay: Duration::ZERO,
        }
    }
}

/// One write lock per local collection.
#[derive(Debug, Default)]
struct CollectionLocks {
    posts: Mutex<()>,
    reports: Mutex<()>,
    aid_requests: Mutex<()>,
}

impl CollectionLocks {
    fn get(&self, collection: Collection) -> &Mutex<()> {
        match collection {
            Collection::Posts => &self.posts,
            Collection::Reports => &self.reports,
            Collection::AidRequests => &self.aid_requests,
        }
    }
}

/// Remote-first, local-fallback access to every record family.
///
/// Generic over the remote and cache collaborators so that
/// safehaven-core never depends on safehaven-infra.
pub struct StoreFacade<R: RemoteClient, L: LocalCache> {
    remote: R,
    cache: L,
    options: StoreOptions,
    locks: CollectionLocks,
}

impl<R: RemoteClient, L: LocalCache> StoreFacade<R, L> {
    /// Create a facade over the given collaborators.
    pub fn new(remote: R, cache: L, options: StoreOptions) -> Self {
        Self {
            remote,
            cache,
            options,
            locks: CollectionLocks::default(),
        }
    }

    /// Access the remote client.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Access the local cache (read-only use outside the facade).
    pub fn cache(&self) -> &L {
        &self.cache
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Whether the backend currently answers the post listing with 2xx.
    ///
    /// Never errors; any failure reads as "offline".
    pub async fn health(&self) -> bool {
        match self.bounded(self.remote.get(posts::POSTS_PATH)).await {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "Backend health check failed");
                false
            }
        }
    }

    // --- Remote helpers ---

    /// Run a remote call under the configured timeout.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, RemoteError>>,
    ) -> Result<T, RemoteError> {
        match tokio::time::timeout(self.options.remote_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(
                self.options.remote_timeout.as_millis() as u64,
            )),
        }
    }

    /// GET `path` and decode the body as `T`.
    async fn remote_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let value = self.bounded(self.remote.get(path)).await?;
        decode(value)
    }

    /// POST `body` to `path` and decode the response as `T`.
    async fn remote_post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, RemoteError> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| RemoteError::Malformed(format!("failed to encode request: {e}")))?;
        let value = self.bounded(self.remote.post(path, body.as_ref())).await?;
        decode(value)
    }

    // --- Local collection helpers ---

    /// Read a collection without taking its lock.
    ///
    /// An absent collection is seeded with `seed()` (and persisted) when a
    /// seed is given, otherwise read as empty without writing.
    async fn load_unlocked<T>(
        &self,
        collection: Collection,
        seed: Option<fn() -> Vec<T>>,
    ) -> Result<Vec<T>, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        match self.cache.get(collection.key()).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::CorruptStore {
                collection: collection.to_string(),
                reason: e.to_string(),
            }),
            None => match seed {
                Some(seed) => {
                    let items = seed();
                    debug!(%collection, count = items.len(), "Seeding empty local collection");
                    self.store_unlocked(collection, &items).await?;
                    Ok(items)
                }
                None => Ok(Vec::new()),
            },
        }
    }

    /// Persist a whole collection without taking its lock.
    async fn store_unlocked<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)
            .map_err(|e| StoreError::Serialization(format!("{collection}: {e}")))?;
        self.cache.set(collection.key(), &raw).await?;
        Ok(())
    }

    /// Read a collection under its lock (seeding when configured).
    async fn read_local<T>(
        &self,
        collection: Collection,
        seed: Option<fn() -> Vec<T>>,
    ) -> Result<Vec<T>, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.locks.get(collection).lock().await;
        self.load_unlocked(collection, seed).await
    }

    /// Read-modify-write a collection under its lock.
    ///
    /// When `apply` fails nothing is written.
    async fn mutate_local<T, O>(
        &self,
        collection: Collection,
        seed: Option<fn() -> Vec<T>>,
        apply: impl FnOnce(&mut Vec<T>) -> Result<O, StoreError>,
    ) -> Result<O, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.locks.get(collection).lock().await;
        let mut items = self.load_unlocked(collection, seed).await?;
        let out = apply(&mut items)?;
        self.store_unlocked(collection, &items).await?;
        Ok(out)
    }
}

/// Decode a remote JSON body; a shape mismatch is a malformed response.
fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, RemoteError> {
    serde_json::from_value(value).map_err(|e| RemoteError::Malformed(e.to_string()))
}

/// Log a data-operation fallback.
fn log_fallback(operation: &'static str, err: &RemoteError) {
    warn!(operation, error = %err, kind = ?err.kind(), "Backend unavailable, using local cache");
}


#[cfg(test)]
mod tests {
    use super::testing::{HangingRemote, OfflineRemote, ScriptedRemote};
    use super::*;
    use crate::cache::memory::InMemoryCache;
    use safehaven_types::post::Post;

    #[tokio::test]
    async fn test_health_reports_online_on_success() {
        let remote = ScriptedRemote::default().respond(Ok(serde_json::json!([])));
        let store = StoreFacade::new(remote, InMemoryCache::new(), StoreOptions::default());
        assert!(store.health().await);
    }

    #[tokio::test]
    async fn test_health_reports_offline_on_transport_error() {
        let store = StoreFacade::new(
            OfflineRemote::default(),
            InMemoryCache::new(),
            StoreOptions::default(),
        );
        assert!(!store.health().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_remote_times_out_into_fallback() {
        let store = StoreFacade::new(
            HangingRemote,
            InMemoryCache::new(),
            StoreOptions::immediate(Duration::from_millis(250)),
        );
        let posts = store.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(!store.health().await);
    }

    #[tokio::test]
    async fn test_corrupt_collection_is_typed_error() {
        let cache = InMemoryCache::new();
        cache.set(Collection::Posts.key(), "{not json").await.unwrap();
        let store = StoreFacade::new(OfflineRemote::default(), cache, StoreOptions::default());

        let err = store.list_posts().await.unwrap_err();
        match err {
            StoreError::CorruptStore { collection, .. } => assert_eq!(collection, "posts"),
            other => panic!("expected CorruptStore, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_mutation_writes_nothing() {
        let cache = InMemoryCache::new();
        let store = StoreFacade::new(OfflineRemote::default(), cache.clone(), StoreOptions::default());

        let result: Result<(), StoreError> = store
            .mutate_local::<Post, ()>(Collection::Reports, None, |_| {
                Err(StoreError::Validation {
                    field: "test",
                    reason: "rejected".to_string(),
                })
            })
            .await;
        assert!(result.is_err());
        assert!(cache.get(Collection::Reports.key()).await.unwrap().is_none());
    }

    #[test]
    fn test_options_from_config() {
        let config = HavenConfig {
            remote_timeout_ms: 1200,
            aid_submit_delay_ms: 0,
            ..Default::default()
        };
        let options = StoreOptions::from(&config);
        assert_eq!(options.remote_timeout, Duration::from_millis(1200));
        assert_eq!(options.aid_submit_delay, Duration::ZERO);
        assert_eq!(options.offline_auth_delay, Duration::from_millis(800));
    }
}
