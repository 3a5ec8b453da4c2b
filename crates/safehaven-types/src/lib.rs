//! Shared domain types for SafeHaven.
//!
//! This crate contains the records exchanged with the remote backend and the
//! local cache (posts, reports, aid requests, user identities), the chat
//! message types, configuration, and the error taxonomy shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod account;
pub mod aid;
pub mod chat;
pub mod config;
pub mod error;
pub mod post;
pub mod report;
