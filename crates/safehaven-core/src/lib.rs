//! Business logic and collaborator trait definitions for SafeHaven.
//!
//! This crate defines the "ports" (remote client, local cache, model client,
//! credential source) that the infrastructure layer implements, plus the two
//! subsystems built on them:
//!
//! - [`store::StoreFacade`]: remote-first, local-fallback access to posts,
//!   reports, aid requests and accounts.
//! - [`chat::manager::ChatSessionManager`]: the streaming support-companion
//!   chat session.
//!
//! It depends only on `safehaven-types` -- never on `safehaven-infra` or any
//! HTTP/database crate.

pub mod cache;
pub mod chat;
pub mod remote;
pub mod store;
