//! Redis-backed [`KeyStore`] adapter.
//!
//! Values are stored as plain strings under the itinerary cache key with
//! `SET key value EX ttl`, so Redis owns expiry. Pool checkout failures and
//! I/O errors map to [`KeyStoreError::Connection`]; anything Redis rejects
//! maps to [`KeyStoreError::Command`].

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection, RunError};
use bb8_redis::redis::{self, RedisError};
use tracing::debug;

use crate::domain::ports::{ItineraryCacheKey, KeyStore, KeyStoreError};

/// Pool settings for [`RedisKeyStore`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use itinerary_backend::outbound::cache::RedisPoolConfig;
///
/// let config = RedisPoolConfig::new("redis://localhost:6379")
///     .with_max_size(8)
///     .with_connection_timeout(Duration::from_secs(2));
/// assert_eq!(config.redis_url(), "redis://localhost:6379");
/// ```
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    redis_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl RedisPoolConfig {
    /// Create a configuration for `redis_url` with 10 connections and a 5
    /// second checkout timeout.
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
        }
    }

    /// Set the maximum number of pooled connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Set how long a checkout may wait for a connection.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the Redis URL.
    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }
}

/// Key store backed by a pooled Redis connection.
#[derive(Clone)]
pub struct RedisKeyStore {
    pool: Pool<RedisConnectionManager>,
}

impl RedisKeyStore {
    /// Build the pool without opening any connection.
    ///
    /// Connections are established lazily, so an unreachable server surfaces
    /// as a [`KeyStoreError::Connection`] on the first `get` rather than at
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::Connection`] when the URL cannot be parsed.
    pub fn connect(config: &RedisPoolConfig) -> Result<Self, KeyStoreError> {
        let manager = RedisConnectionManager::new(config.redis_url())
            .map_err(|err| KeyStoreError::connection(format!("invalid Redis URL: {err}")))?;
        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build_unchecked(manager);
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, KeyStoreError> {
        self.pool.get().await.map_err(map_pool_error)
    }
}

/// `SET ... EX` rejects zero, so sub-second TTLs round up to one second.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn map_pool_error(err: RunError<RedisError>) -> KeyStoreError {
    match err {
        RunError::User(err) => map_redis_error(err),
        RunError::TimedOut => KeyStoreError::connection("timed out waiting for a connection"),
    }
}

fn map_redis_error(err: RedisError) -> KeyStoreError {
    if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
        KeyStoreError::connection(err.to_string())
    } else {
        KeyStoreError::command(err.to_string())
    }
}

#[async_trait]
impl KeyStore for RedisKeyStore {
    async fn get(&self, key: &ItineraryCacheKey) -> Result<Option<String>, KeyStoreError> {
        let mut conn = self.connection().await?;
        let value = redis::cmd("GET")
            .arg(key.as_str())
            .query_async::<Option<String>>(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        debug!(%key, found = value.is_some(), "redis GET");
        Ok(value)
    }

    async fn set(
        &self,
        key: &ItineraryCacheKey,
        value: &str,
        ttl: Duration,
    ) -> Result<(), KeyStoreError> {
        let mut conn = self.connection().await?;
        let seconds = expiry_seconds(ttl);
        redis::cmd("SET")
            .arg(key.as_str())
            .arg(value)
            .arg("EX")
            .arg(seconds)
            .query_async::<()>(&mut *conn)
            .await
            .map_err(map_redis_error)?;
        debug!(%key, ttl_secs = seconds, "redis SET");
        Ok(())
    }
}
