//! Remote backend client trait.
//!
//! The backend is an opaque JSON-over-HTTP service. Implementations decide
//! at the boundary whether a failure is a transport problem or a well-formed
//! application rejection, and report it through [`RemoteError`].

use safehaven_types::error::RemoteError;

/// Trait for the remote backend (request/response JSON over a fixed base path).
///
/// Paths are relative to the backend's base path (e.g. `/posts/`).
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in safehaven-infra.
pub trait RemoteClient: Send + Sync {
    /// Issue a GET and return the decoded JSON body of a 2xx response.
    fn get(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, RemoteError>> + Send;

    /// Issue a POST with an optional JSON body and return the decoded JSON
    /// body of a 2xx response.
    fn post(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, RemoteError>> + Send;
}
