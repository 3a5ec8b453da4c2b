//! Model backend abstraction.
//!
//! Implementations live in safehaven-infra (e.g., `GeminiConnector`).

use std::pin::Pin;

use futures_util::Stream;
use secrecy::SecretString;

use safehaven_types::chat::ModelRequest;
use safehaven_types::error::ModelError;

/// A lazy, finite stream of text chunks from the model.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, ModelError>> + Send + 'static>>;

/// A connected model session.
///
/// `stream` returns a boxed stream so that clients stay object-safe and the
/// stream does not borrow the client.
pub trait ModelClient: Send + Sync {
    /// Human-readable backend name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send the conversation and stream back the reply text in chunks.
    fn stream(&self, request: ModelRequest) -> ChunkStream;
}

/// Builds a [`ModelClient`] once a credential is available.
pub trait ModelConnector: Send + Sync {
    type Client: ModelClient;

    fn connect(&self, api_key: SecretString, model: &str) -> Result<Self::Client, ModelError>;
}

/// Where the model credential comes from.
pub trait CredentialSource: Send + Sync {
    /// Name shown to the operator when the credential is missing (e.g., "API_KEY").
    fn name(&self) -> &str;

    /// The credential, or `None` if it is not configured.
    fn resolve(&self) -> Option<SecretString>;
}

/// A credential known up front (or known to be absent).
pub struct StaticCredential {
    name: String,
    value: Option<SecretString>,
}

impl StaticCredential {
    pub fn new(name: impl Into<String>, value: Option<SecretString>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// A credential that is never available.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

impl CredentialSource for StaticCredential {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> Option<SecretString> {
        self.value.clone()
    }
}
