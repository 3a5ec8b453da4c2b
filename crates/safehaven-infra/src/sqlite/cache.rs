//! SQLite implementation of the local cache.
//!
//! One row per collection key. Writes replace the whole value.

use chrono::Utc;
use sqlx::Row;

use safehaven_core::cache::LocalCache;
use safehaven_types::error::CacheError;

use super::pool::DatabasePool;

/// Pool and I/O failures mean the database itself is unreachable; anything
/// else is a failed statement.
fn cache_error(err: sqlx::Error) -> CacheError {
    let message = err.to_string();
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            CacheError::Connection(message)
        }
        _ => CacheError::Backend(message),
    }
}

/// SQLite-backed implementation of [`LocalCache`].
#[derive(Clone)]
pub struct SqliteLocalCache {
    pool: DatabasePool,
}

impl SqliteLocalCache {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

impl LocalCache for SqliteLocalCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let row = sqlx::query("SELECT value FROM local_cache WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(cache_error)?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(cache_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        sqlx::query(
            r#"INSERT INTO local_cache (key, value, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(cache_error)?;

        tracing::trace!(key, bytes = value.len(), "Local cache entry written");
        Ok(())
    }
}
