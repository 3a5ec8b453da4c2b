//! Infrastructure layer for SafeHaven.
//!
//! Contains implementations of the collaborator traits defined in
//! `safehaven-core`: the HTTP backend client, the SQLite-backed local cache,
//! the Gemini streaming chat client and the environment credential source.

pub mod config;
pub mod llm;
pub mod remote;
pub mod secret;
pub mod sqlite;
