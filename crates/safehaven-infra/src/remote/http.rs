//! JSON-over-HTTP backend client.
//!
//! Classifies every failure at the boundary:
//! - request never completes (connect, DNS, reset, client timeout) -> `Transport`/`Timeout`
//! - non-2xx response -> `Application`, with the backend's error message
//! - 2xx with a body that is not JSON -> `Malformed`

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};

use safehaven_core::remote::RemoteClient;
use safehaven_types::error::RemoteError;

/// Implements [`RemoteClient`] over reqwest.
#[derive(Clone)]
pub struct HttpRemoteClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRemoteClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// `timeout` bounds each whole request, body included.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<serde_json::Value, RemoteError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::debug!(status = %status, message = %message, "Backend rejected request");
            return Err(RemoteError::Application {
                status: status.as_u16(),
                message,
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| RemoteError::Malformed(e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout(self.timeout.as_millis() as u64)
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

/// Best-effort human message from an error body.
///
/// Prefers an `error`, `message` or `msg` string field, then the raw text,
/// then the status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for field in ["error", "message", "msg"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if !text.is_empty() {
        return text;
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

impl RemoteClient for HttpRemoteClient {
    async fn get(&self, path: &str) -> Result<serde_json::Value, RemoteError> {
        tracing::trace!(path, "GET");
        self.execute(self.client.get(self.url(path))).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, RemoteError> {
        tracing::trace!(path, "POST");
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }
}
