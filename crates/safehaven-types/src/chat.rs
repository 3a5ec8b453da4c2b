//! Chat message and session-state types for the support companion.
//!
//! Messages live only in memory for the lifetime of a chat session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Model => write!(f, "model"),
        }
    }
}

impl FromStr for ChatRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(ChatRole::User),
            "model" => Ok(ChatRole::Model),
            other => Err(format!("invalid chat role: '{other}'")),
        }
    }
}

/// A single message in the chat history.
///
/// Error messages are ordinary history entries flagged with `is_error`,
/// so the rendering layer never has to handle a raised error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            is_error: true,
        }
    }
}

/// Why the most recent turn failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The model credential is not configured.
    MissingCredential,
    /// The backend could not be reached or the stream broke.
    Connectivity,
}

/// Lifecycle state of a chat session manager.
///
/// `Uninitialized -> Ready -> Sending -> Streaming -> Ready`, with
/// `Failed` reachable from `Uninitialized` and `Streaming`. A failure only
/// affects the turn it happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    Ready,
    Sending,
    Streaming,
    Failed(FailureReason),
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::Ready => write!(f, "ready"),
            SessionState::Sending => write!(f, "sending"),
            SessionState::Streaming => write!(f, "streaming"),
            SessionState::Failed(FailureReason::MissingCredential) => {
                write!(f, "failed (missing credential)")
            }
            SessionState::Failed(FailureReason::Connectivity) => write!(f, "failed (connectivity)"),
        }
    }
}

/// A streaming request to the model backend.
///
/// Carries the whole conversation so far; the backend keeps no state
/// between turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRequest {
    pub model: String,
    pub system_instruction: String,
    pub messages: Vec<ChatMessage>,
}
