//! Remote backend clients.

pub mod http;

pub use http::HttpRemoteClient;
