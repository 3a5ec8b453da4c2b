//! Financial aid request records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of an aid request. Changes happen outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AidStatus {
    Pending,
    Approved,
    Funded,
    Rejected,
}

impl fmt::Display for AidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AidStatus::Pending => write!(f, "pending"),
            AidStatus::Approved => write!(f, "approved"),
            AidStatus::Funded => write!(f, "funded"),
            AidStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for AidStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(AidStatus::Pending),
            "approved" => Ok(AidStatus::Approved),
            "funded" => Ok(AidStatus::Funded),
            "rejected" => Ok(AidStatus::Rejected),
            other => Err(format!("invalid aid status: '{other}'")),
        }
    }
}

/// A stored aid request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AidRequest {
    pub id: String,
    pub user_id: String,
    /// Requester's name as it was at submission time.
    pub user_name: String,
    pub amount: f64,
    pub reason: String,
    pub status: AidStatus,
    pub timestamp: DateTime<Utc>,
}

/// Caller-supplied fields for a new aid request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAidRequest {
    pub user_id: String,
    pub user_name: String,
    pub amount: f64,
    pub reason: String,
}
