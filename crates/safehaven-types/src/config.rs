//! Configuration types for SafeHaven.
//!
//! `HavenConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default, so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.safehaven/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HavenConfig {
    /// Base URL of the remote backend, including the `/api` prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upper bound on any single remote call before falling back.
    #[serde(default = "default_remote_timeout_ms")]
    pub remote_timeout_ms: u64,

    /// Simulated latency for local aid request submission.
    #[serde(default = "default_aid_submit_delay_ms")]
    pub aid_submit_delay_ms: u64,

    /// Simulated latency for offline login/registration.
    #[serde(default = "default_offline_auth_delay_ms")]
    pub offline_auth_delay_ms: u64,

    #[serde(default)]
    pub chat: ChatConfig,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_remote_timeout_ms() -> u64 {
    5_000
}

fn default_aid_submit_delay_ms() -> u64 {
    800
}

fn default_offline_auth_delay_ms() -> u64 {
    800
}

impl Default for HavenConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            remote_timeout_ms: default_remote_timeout_ms(),
            aid_submit_delay_ms: default_aid_submit_delay_ms(),
            offline_auth_delay_ms: default_offline_auth_delay_ms(),
            chat: ChatConfig::default(),
        }
    }
}

/// Settings for the support companion chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Model identifier sent to the backend.
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Override for the model endpoint (OpenAI-compatible).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_chat_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_chat_model(),
            api_key_env: default_api_key_env(),
            base_url: None,
        }
    }
}
