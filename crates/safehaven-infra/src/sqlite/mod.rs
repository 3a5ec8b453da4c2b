//! SQLite storage layer.
//!
//! The durable local cache, backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod cache;
pub mod pool;

pub use cache::SqliteLocalCache;
pub use pool::DatabasePool;
