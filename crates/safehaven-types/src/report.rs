//! Incident report records.
//!
//! Reports can be filed anonymously. Every report carries an access code that
//! lets its submitter track it later without an account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of a report.
///
/// Advanced only by an administrative actor:
/// `received -> reviewing -> action_taken -> resolved`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Received,
    Reviewing,
    ActionTaken,
    Resolved,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::Received => write!(f, "received"),
            ReportStatus::Reviewing => write!(f, "reviewing"),
            ReportStatus::ActionTaken => write!(f, "action_taken"),
            ReportStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "received" => Ok(ReportStatus::Received),
            "reviewing" => Ok(ReportStatus::Reviewing),
            "action_taken" => Ok(ReportStatus::ActionTaken),
            "resolved" => Ok(ReportStatus::Resolved),
            other => Err(format!("invalid report status: '{other}'")),
        }
    }
}

/// Where an incident happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A stored incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    /// Reporter name, only present when not anonymous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Reporter contact, only present when not anonymous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Opaque token for ownerless lookup. Generated once at creation.
    #[serde(default)]
    pub access_code: String,
    /// Category label.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    /// When the incident happened (distinct from `submitted_at`).
    #[serde(rename = "date")]
    pub incident_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
}

/// Caller-supplied fields for a new report. Everything else is filled in
/// at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "date", default, skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Category used when a draft does not name one.
pub const DEFAULT_REPORT_KIND: &str = "Other";

/// Credentials handed back after saving a report.
///
/// The caller must keep both values to track the report later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportReceipt {
    #[serde(rename = "report_id")]
    pub id: String,
    pub access_code: String,
}

/// Body of a guest tracking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub report_id: String,
    pub access_code: String,
}

/// Body of an administrative response to a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondRequest {
    pub response: String,
    pub status: ReportStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_roundtrip_strings() {
        for status in [
            ReportStatus::Received,
            ReportStatus::Reviewing,
            ReportStatus::ActionTaken,
            ReportStatus::Resolved,
        ] {
            assert_eq!(status.to_string().parse::<ReportStatus>().unwrap(), status);
        }
        assert!("closed".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn test_report_status_ordering_follows_lifecycle() {
        assert!(ReportStatus::Received < ReportStatus::Reviewing);
        assert!(ReportStatus::Reviewing < ReportStatus::ActionTaken);
        assert!(ReportStatus::ActionTaken < ReportStatus::Resolved);
    }

    #[test]
    fn test_report_status_defaults_to_received() {
        assert_eq!(ReportStatus::default(), ReportStatus::Received);
    }

    #[test]
    fn test_report_wire_names() {
        let report = Report {
            id: "1".to_string(),
            user_id: Some("u1".to_string()),
            is_anonymous: false,
            name: None,
            contact: None,
            access_code: "ABC".to_string(),
            kind: "Harassment".to_string(),
            description: "desc".to_string(),
            incident_date: Utc::now(),
            location: Some(Location { lat: 1.0, lng: 2.0 }),
            submitted_at: Utc::now(),
            status: ReportStatus::ActionTaken,
            admin_response: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["accessCode"], "ABC");
        assert_eq!(value["type"], "Harassment");
        assert_eq!(value["status"], "action_taken");
        assert!(value.get("date").is_some());
        assert!(value.get("adminResponse").is_none());
    }

    #[test]
    fn test_receipt_reads_backend_shape() {
        let receipt: ReportReceipt =
            serde_json::from_str(r#"{"report_id":"r1","access_code":"XYZ"}"#).unwrap();
        assert_eq!(receipt.id, "r1");
        assert_eq!(receipt.access_code, "XYZ");
    }
}
