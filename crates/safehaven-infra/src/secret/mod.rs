//! Credential sources for the model backend.

pub mod env;

pub use env::EnvCredential;
