use thiserror::Error;

/// Coarse classification of a failure, decided at the collaborator boundary.
///
/// - `Transport`: the collaborator could not be reached or its answer could
///   not be understood. The store falls back to the local cache.
/// - `Application`: a well-formed rejection (validation, not found, bad
///   credentials). Always surfaced to the caller.
/// - `Configuration`: something the operator has to fix (missing credential).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Application,
    Configuration,
}

/// Errors from the remote backend client.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote unreachable: {0}")]
    Transport(String),

    #[error("remote request timed out after {0}ms")]
    Timeout(u64),

    #[error("remote rejected request (HTTP {status}): {message}")]
    Application { status: u16, message: String },

    #[error("malformed remote response: {0}")]
    Malformed(String),
}

impl RemoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RemoteError::Transport(_) | RemoteError::Timeout(_) | RemoteError::Malformed(_) => {
                ErrorKind::Transport
            }
            RemoteError::Application { .. } => ErrorKind::Application,
        }
    }

    /// True when the backend could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RemoteError::Transport(_) | RemoteError::Timeout(_))
    }
}

/// Errors from the local key-value cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("cache connection error: {0}")]
    Connection(String),
}

/// Errors from the resilient store facade.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local collection '{collection}' is corrupt: {reason}")]
    CorruptStore { collection: String, reason: String },

    #[error("{family} '{id}' not found")]
    NotFound { family: &'static str, id: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Remote(err) => err.kind(),
            StoreError::Cache(_) | StoreError::CorruptStore { .. } | StoreError::Serialization(_) => {
                ErrorKind::Transport
            }
            StoreError::NotFound { .. } | StoreError::Validation { .. } => ErrorKind::Application,
        }
    }
}

/// Errors from login and registration.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Errors from the model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing credential: {0} is not set")]
    MissingCredential(String),

    #[error("model request failed: {0}")]
    Transport(String),

    #[error("model provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("stream error: {0}")]
    Stream(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl ModelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::MissingCredential(_) => ErrorKind::Configuration,
            ModelError::Provider { .. } => ErrorKind::Application,
            ModelError::Transport(_) | ModelError::Stream(_) | ModelError::Deserialization(_) => {
                ErrorKind::Transport
            }
        }
    }
}
