//! Streaming chat session with the support companion.
//!
//! `ChatSessionManager` owns the conversation history and turns a model
//! backend's chunk stream into a stream of history snapshots. Backend
//! failures never surface as errors; they become flagged history entries.

pub mod manager;
pub mod model;
pub mod persona;

pub use manager::{ChatSessionManager, SessionSettings};
pub use model::{ChunkStream, CredentialSource, ModelClient, ModelConnector, StaticCredential};
