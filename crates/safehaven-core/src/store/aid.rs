//! Financial aid requests.
//!
//! There is no backend endpoint for aid requests; they are always served from
//! the local cache, with a short artificial delay on submission.

use chrono::Utc;
use tracing::info;

use safehaven_types::aid::{AidRequest, AidStatus, NewAidRequest};
use safehaven_types::error::StoreError;

use super::StoreFacade;
use crate::cache::{Collection, LocalCache};
use crate::remote::RemoteClient;

impl<R: RemoteClient, L: LocalCache> StoreFacade<R, L> {
    /// Submit an aid request. Assigns id, `pending` status and timestamp.
    ///
    /// Rejects amounts that are not strictly positive finite numbers.
    pub async fn create_aid_request(&self, request: NewAidRequest) -> Result<AidRequest, StoreError> {
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(StoreError::Validation {
                field: "amount",
                reason: format!("must be a positive number, got {}", request.amount),
            });
        }

        tokio::time::sleep(self.options.aid_submit_delay).await;

        let created = AidRequest {
            id: format!("req_{}", uuid::Uuid::now_v7()),
            user_id: request.user_id,
            user_name: request.user_name,
            amount: request.amount,
            reason: request.reason,
            status: AidStatus::Pending,
            timestamp: Utc::now(),
        };

        let stored = created.clone();
        self.mutate_local(Collection::AidRequests, None, |requests: &mut Vec<AidRequest>| {
            requests.push(stored);
            Ok(())
        })
        .await?;

        info!(id = %created.id, user_id = %created.user_id, "Aid request submitted");
        Ok(created)
    }

    /// Aid requests, newest first. Filtered to one requester when `user_id` is given.
    pub async fn list_aid_requests(
        &self,
        user_id: Option<&str>,
    ) -> Result<Vec<AidRequest>, StoreError> {
        let mut requests: Vec<AidRequest> = self.read_local(Collection::AidRequests, None).await?;
        if let Some(user_id) = user_id {
            requests.retain(|r| r.user_id == user_id);
        }
        requests.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::*;
    use crate::cache::memory::InMemoryCache;
    use crate::store::StoreOptions;
    use crate::store::testing::OfflineRemote;

    fn store() -> StoreFacade<OfflineRemote, InMemoryCache> {
        StoreFacade::new(
            OfflineRemote::default(),
            InMemoryCache::new(),
            StoreOptions::immediate(Duration::from_secs(1)),
        )
    }

    fn request(user: &str, amount: f64) -> NewAidRequest {
        NewAidRequest {
            user_id: user.to_string(),
            user_name: format!("{user}-name"),
            amount,
            reason: "rent".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_defaults() {
        let store = store();
        let created = store.create_aid_request(request("u1", 250.0)).await.unwrap();
        assert!(created.id.starts_with("req_"));
        assert_eq!(created.status, AidStatus::Pending);
        assert_eq!(created.user_name, "u1-name");
    }

    #[tokio::test]
    async fn test_create_never_touches_remote() {
        let store = store();
        store.create_aid_request(request("u1", 10.0)).await.unwrap();
        store.list_aid_requests(None).await.unwrap();
        assert_eq!(store.remote().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_amounts_rejected() {
        let store = store();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = store.create_aid_request(request("u1", amount)).await.unwrap_err();
            assert!(matches!(err, StoreError::Validation { field: "amount", .. }));
        }
        assert!(store.list_aid_requests(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_user_and_sorts_newest_first() {
        // A small real delay keeps the timestamps distinct.
        let store = StoreFacade::new(
            OfflineRemote::default(),
            InMemoryCache::new(),
            StoreOptions {
                aid_submit_delay: Duration::from_millis(2),
                ..StoreOptions::immediate(Duration::from_secs(1))
            },
        );
        let first = store.create_aid_request(request("u1", 1.0)).await.unwrap();
        store.create_aid_request(request("u2", 2.0)).await.unwrap();
        let third = store.create_aid_request(request("u1", 3.0)).await.unwrap();

        let mine = store.list_aid_requests(Some("u1")).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine[0].timestamp >= mine[1].timestamp);
        assert_eq!(mine[0].id, third.id);
        assert_eq!(mine[1].id, first.id);

        let all = store.list_aid_requests(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_waits_for_configured_delay() {
        let store = StoreFacade::new(
            OfflineRemote::default(),
            InMemoryCache::new(),
            StoreOptions::default(),
        );
        let start = tokio::time::Instant::now();
        store.create_aid_request(request("u1", 5.0)).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));
    }
}
