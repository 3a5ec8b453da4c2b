//! Incident reports: save, per-user listing, guest tracking, admin review.

use chrono::Utc;

use safehaven_types::error::{ErrorKind, StoreError};
use safehaven_types::report::{
    DEFAULT_REPORT_KIND, Report, ReportDraft, ReportReceipt, ReportStatus, RespondRequest,
    TrackRequest,
};

use super::{StoreFacade, access_code, log_fallback};
use crate::cache::{Collection, LocalCache};
use crate::remote::RemoteClient;

const REPORTS_PATH: &str = "/reports/";
const TRACK_PATH: &str = "/reports/track";
const ADMIN_REPORTS_PATH: &str = "/admin/reports";

fn user_reports_path(user_id: &str) -> String {
    format!("/reports/user/{user_id}")
}

fn respond_path(report_id: &str) -> String {
    format!("/admin/reports/{report_id}/respond")
}

/// Build a stored report from a draft, filling every server-side default.
fn report_from_draft(draft: ReportDraft) -> Report {
    let now = Utc::now();
    let is_anonymous = draft.is_anonymous.unwrap_or(false);
    let (name, contact) = if is_anonymous {
        (None, None)
    } else {
        (draft.name, draft.contact)
    };

    Report {
        id: uuid::Uuid::now_v7().to_string(),
        user_id: draft.user_id,
        is_anonymous,
        name,
        contact,
        access_code: access_code::generate(),
        kind: draft
            .kind
            .unwrap_or_else(|| DEFAULT_REPORT_KIND.to_string()),
        description: draft.description.unwrap_or_default(),
        incident_date: draft.incident_date.unwrap_or(now),
        location: draft.location,
        submitted_at: now,
        status: ReportStatus::Received,
        admin_response: None,
    }
}

impl<R: RemoteClient, L: LocalCache> StoreFacade<R, L> {
    /// File a report.
    ///
    /// Returns only the id and access code; the caller keeps them as opaque
    /// credentials for [`track_report`](Self::track_report).
    pub async fn save_report(&self, draft: ReportDraft) -> Result<ReportReceipt, StoreError> {
        match self
            .remote_post::<_, ReportReceipt>(REPORTS_PATH, Some(&draft))
            .await
        {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                log_fallback("save_report", &err);
                let report = report_from_draft(draft);
                let receipt = ReportReceipt {
                    id: report.id.clone(),
                    access_code: report.access_code.clone(),
                };
                self.mutate_local(Collection::Reports, None, |reports: &mut Vec<Report>| {
                    reports.push(report);
                    Ok(())
                })
                .await?;
                Ok(receipt)
            }
        }
    }

    /// Reports filed by `user_id`, most recently submitted first.
    pub async fn list_reports_for_user(&self, user_id: &str) -> Result<Vec<Report>, StoreError> {
        match self
            .remote_get::<Vec<Report>>(&user_reports_path(user_id))
            .await
        {
            Ok(reports) => Ok(reports),
            Err(err) => {
                log_fallback("list_reports_for_user", &err);
                let mut reports: Vec<Report> = self
                    .read_local::<Report>(Collection::Reports, None)
                    .await?
                    .into_iter()
                    .filter(|r| r.user_id.as_deref() == Some(user_id))
                    .collect();
                reports.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
                Ok(reports)
            }
        }
    }

    /// Look a report up by id and access code, without an account.
    ///
    /// Returns `None` unless both match exactly. A well-formed rejection
    /// from the backend is a definitive "not found"; only an unreachable
    /// backend falls back to the local cache.
    pub async fn track_report(
        &self,
        report_id: &str,
        access_code: &str,
    ) -> Result<Option<Report>, StoreError> {
        let body = TrackRequest {
            report_id: report_id.to_string(),
            access_code: access_code.to_string(),
        };
        match self
            .remote_post::<_, Option<Report>>(TRACK_PATH, Some(&body))
            .await
        {
            Ok(report) => Ok(report),
            Err(err) if err.kind() == ErrorKind::Application => {
                tracing::debug!(report_id, error = %err, "Backend did not find report");
                Ok(None)
            }
            Err(err) => {
                log_fallback("track_report", &err);
                let reports = self.read_local::<Report>(Collection::Reports, None).await?;
                Ok(reports
                    .into_iter()
                    .find(|r| r.id == report_id && r.access_code == access_code))
            }
        }
    }

    /// Every report, unfiltered. Administrative read.
    pub async fn list_all_reports(&self) -> Result<Vec<Report>, StoreError> {
        match self.remote_get::<Vec<Report>>(ADMIN_REPORTS_PATH).await {
            Ok(reports) => Ok(reports),
            Err(err) => {
                log_fallback("list_all_reports", &err);
                self.read_local(Collection::Reports, None).await
            }
        }
    }

    /// Record an administrative response and status on a report.
    ///
    /// Only `admin_response` and `status` change; the latest write wins.
    /// Status only moves forward along the lifecycle; repeating the current
    /// status is allowed. Fails with [`StoreError::NotFound`] when no report
    /// has `report_id`, and with [`StoreError::Validation`] on a backwards move.
    pub async fn respond_to_report(
        &self,
        report_id: &str,
        response: &str,
        status: ReportStatus,
    ) -> Result<Report, StoreError> {
        let body = RespondRequest {
            response: response.to_string(),
            status,
        };
        match self
            .remote_post::<_, Report>(&respond_path(report_id), Some(&body))
            .await
        {
            Ok(report) => Ok(report),
            Err(err) => {
                log_fallback("respond_to_report", &err);
                self.mutate_local(Collection::Reports, None, |reports: &mut Vec<Report>| {
                    let report = reports
                        .iter_mut()
                        .find(|r| r.id == report_id)
                        .ok_or_else(|| StoreError::NotFound {
                            family: "report",
                            id: report_id.to_string(),
                        })?;
                    if body.status < report.status {
                        return Err(StoreError::Validation {
                            field: "status",
                            reason: format!(
                                "cannot move from {} back to {}",
                                report.status, body.status
                            ),
                        });
                    }
                    report.admin_response = Some(body.response);
                    report.status = body.status;
                    Ok(report.clone())
                })
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::InMemoryCache;
    use crate::store::StoreOptions;
    use crate::store::testing::{OfflineRemote, ScriptedRemote};
    use chrono::Duration;
    use safehaven_types::error::RemoteError;
    use safehaven_types::report::Location;

    fn offline_store() -> StoreFacade<OfflineRemote, InMemoryCache> {
        StoreFacade::new(OfflineRemote::default(), InMemoryCache::new(), StoreOptions::default())
    }

    fn draft(user: Option<&str>, description: &str) -> ReportDraft {
        ReportDraft {
            user_id: user.map(str::to_string),
            description: Some(description.to_string()),
            kind: Some("Harassment".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_saved_report_is_trackable_with_its_code() {
        let store = offline_store();
        let receipt = store.save_report(draft(None, "followed home")).await.unwrap();

        let found = store
            .track_report(&receipt.id, &receipt.access_code)
            .await
            .unwrap()
            .expect("report should be found");
        assert_eq!(found.description, "followed home");
        assert_eq!(found.status, ReportStatus::Received);

        let missing = store.track_report(&receipt.id, "WRONGCODE").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_save_fills_defaults() {
        let store = offline_store();
        let receipt = store.save_report(ReportDraft::default()).await.unwrap();
        let report = store
            .track_report(&receipt.id, &receipt.access_code)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.kind, "Other");
        assert_eq!(report.description, "");
        assert!(!report.is_anonymous);
        assert!(report.admin_response.is_none());
        assert_eq!(report.access_code.len(), access_code::ACCESS_CODE_LEN);
    }

    #[tokio::test]
    async fn test_anonymous_report_drops_identity_fields() {
        let store = offline_store();
        let receipt = store
            .save_report(ReportDraft {
                is_anonymous: Some(true),
                name: Some("Jane".to_string()),
                contact: Some("jane@example.com".to_string()),
                location: Some(Location { lat: -1.28, lng: 36.82 }),
                ..Default::default()
            })
            .await
            .unwrap();
        let report = store
            .track_report(&receipt.id, &receipt.access_code)
            .await
            .unwrap()
            .unwrap();

        assert!(report.is_anonymous);
        assert!(report.name.is_none());
        assert!(report.contact.is_none());
        assert_eq!(report.location, Some(Location { lat: -1.28, lng: 36.82 }));
    }

    #[tokio::test]
    async fn test_each_report_gets_its_own_code() {
        let store = offline_store();
        let a = store.save_report(draft(None, "a")).await.unwrap();
        let b = store.save_report(draft(None, "b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.access_code, b.access_code);
        assert!(store.track_report(&a.id, &b.access_code).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_for_user_filters_and_sorts_descending() {
        let cache = InMemoryCache::new();
        let store = StoreFacade::new(OfflineRemote::default(), cache.clone(), StoreOptions::default());

        let base = Utc::now();
        let mut reports = Vec::new();
        for (i, user) in ["u1", "u2", "u1", "u1"].iter().enumerate() {
            let mut report = report_from_draft(draft(Some(user), &format!("r{i}")));
            report.submitted_at = base - Duration::minutes(10 * ((i as i64 * 7) % 4));
            reports.push(report);
        }
        cache
            .set(Collection::Reports.key(), &serde_json::to_string(&reports).unwrap())
            .await
            .unwrap();

        let mine = store.list_reports_for_user("u1").await.unwrap();
        assert_eq!(mine.len(), 3);
        assert!(mine.iter().all(|r| r.user_id.as_deref() == Some("u1")));
        assert!(mine.windows(2).all(|w| w[0].submitted_at >= w[1].submitted_at));
    }

    #[tokio::test]
    async fn test_list_for_user_on_empty_cache_is_empty() {
        let store = offline_store();
        assert!(store.list_reports_for_user("u1").await.unwrap().is_empty());
        assert!(store.list_all_reports().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_respond_overwrites_response_and_status_only() {
        let store = offline_store();
        let receipt = store.save_report(draft(Some("u1"), "noise")).await.unwrap();

        store
            .respond_to_report(&receipt.id, "Looking into it", ReportStatus::Reviewing)
            .await
            .unwrap();
        let updated = store
            .respond_to_report(&receipt.id, "Resolved with landlord", ReportStatus::Resolved)
            .await
            .unwrap();

        assert_eq!(updated.admin_response.as_deref(), Some("Resolved with landlord"));
        assert_eq!(updated.status, ReportStatus::Resolved);
        assert_eq!(updated.description, "noise");
        assert_eq!(updated.access_code, receipt.access_code);

        let all = store.list_all_reports().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], updated);
    }

    #[tokio::test]
    async fn test_respond_rejects_status_moving_backwards() {
        let store = offline_store();
        let receipt = store.save_report(draft(Some("u1"), "noise")).await.unwrap();
        store
            .respond_to_report(&receipt.id, "Closed out", ReportStatus::Resolved)
            .await
            .unwrap();

        let err = store
            .respond_to_report(&receipt.id, "Reopening", ReportStatus::Received)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "status", .. }));

        let all = store.list_all_reports().await.unwrap();
        assert_eq!(all[0].status, ReportStatus::Resolved);
        assert_eq!(all[0].admin_response.as_deref(), Some("Closed out"));

        let same = store
            .respond_to_report(&receipt.id, "Follow-up note", ReportStatus::Resolved)
            .await
            .unwrap();
        assert_eq!(same.admin_response.as_deref(), Some("Follow-up note"));
    }

    #[tokio::test]
    async fn test_respond_unknown_report_is_not_found() {
        let store = offline_store();
        let err = store
            .respond_to_report("nope", "text", ReportStatus::Reviewing)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { family: "report", .. }));

        store.save_report(draft(None, "x")).await.unwrap();
        let err = store
            .respond_to_report("nope", "text", ReportStatus::Reviewing)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_remote_save_returns_backend_receipt() {
        let remote = ScriptedRemote::default()
            .respond(Ok(serde_json::json!({"report_id": "r-9", "access_code": "K7K7"})));
        let cache = InMemoryCache::new();
        let store = StoreFacade::new(remote, cache.clone(), StoreOptions::default());

        let receipt = store.save_report(draft(Some("u1"), "x")).await.unwrap();
        assert_eq!(receipt.id, "r-9");
        assert_eq!(receipt.access_code, "K7K7");
        assert!(cache.is_empty());

        let recorded = store.remote().recorded();
        assert_eq!(recorded[0].1, "/reports/");
        assert_eq!(recorded[0].2.as_ref().unwrap()["userId"], "u1");
    }

    #[tokio::test]
    async fn test_remote_track_rejection_is_not_found_without_fallback() {
        let remote = ScriptedRemote::default().respond(Err(RemoteError::Application {
            status: 404,
            message: "not found".to_string(),
        }));
        let cache = InMemoryCache::new();
        let report = report_from_draft(draft(None, "local only"));
        cache
            .set(
                Collection::Reports.key(),
                &serde_json::to_string(&vec![report.clone()]).unwrap(),
            )
            .await
            .unwrap();
        let store = StoreFacade::new(remote, cache, StoreOptions::default());

        let found = store.track_report(&report.id, &report.access_code).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_remote_track_sends_camel_case_body() {
        let remote = ScriptedRemote::default().respond(Ok(serde_json::Value::Null));
        let store = StoreFacade::new(remote, InMemoryCache::new(), StoreOptions::default());

        assert!(store.track_report("r1", "CODE").await.unwrap().is_none());
        let recorded = store.remote().recorded();
        assert_eq!(recorded[0].1, "/reports/track");
        assert_eq!(
            recorded[0].2,
            Some(serde_json::json!({"reportId": "r1", "accessCode": "CODE"}))
        );
    }

    #[tokio::test]
    async fn test_remote_respond_path_and_body() {
        let report = report_from_draft(draft(None, "x"));
        let remote = ScriptedRemote::default().respond(Ok(serde_json::to_value(&report).unwrap()));
        let store = StoreFacade::new(remote, InMemoryCache::new(), StoreOptions::default());

        store
            .respond_to_report(&report.id, "ok", ReportStatus::ActionTaken)
            .await
            .unwrap();
        let recorded = store.remote().recorded();
        assert_eq!(recorded[0].1, format!("/admin/reports/{}/respond", report.id));
        assert_eq!(
            recorded[0].2,
            Some(serde_json::json!({"response": "ok", "status": "action_taken"}))
        );
    }
}
