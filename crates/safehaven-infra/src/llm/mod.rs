//! Model backend clients.
//!
//! Gemini is reached through its OpenAI-compatible chat completions endpoint,
//! streamed as server-sent events.

pub mod gemini;
pub mod streaming;
pub mod types;

pub use gemini::{GEMINI_BASE_URL, GeminiClient, GeminiConnector};
