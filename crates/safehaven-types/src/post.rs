//! Community post and comment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a community post.
///
/// Owned exclusively by its parent [`Post`]; comments are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Comment {
    /// Create a comment with a fresh id stamped at the current instant.
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: format!("c_{}", uuid::Uuid::now_v7()),
            author: author.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A community post with its like counter and comment thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Create a post with no likes and no comments.
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            author: author.into(),
            content: content.into(),
            timestamp: Utc::now(),
            likes: 0,
            comments: Vec::new(),
        }
    }
}
