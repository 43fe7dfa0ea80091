//! Port interface for the key/value store backing the itinerary cache.
use std::time::Duration;

use async_trait::async_trait;

use super::{ItineraryCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by key store adapters.
    pub enum KeyStoreError {
        /// Store is unreachable or the connection dropped.
        Connection { message: String } => "key store connection failed: {message}",
        /// Store answered but rejected or failed the command.
        Command { message: String } => "key store command failed: {message}",
    }
}

/// Key/value map with per-entry expiry.
///
/// Entries are opaque strings. An entry written with `ttl` must read back as
/// absent once `ttl` has elapsed (subject to the store's expiry granularity).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Read the value stored under `key`, or `None` when absent or expired.
    async fn get(&self, key: &ItineraryCacheKey) -> Result<Option<String>, KeyStoreError>;

    /// Store `value` under `key`, replacing any existing entry, for `ttl`.
    async fn set(
        &self,
        key: &ItineraryCacheKey,
        value: &str,
        ttl: Duration,
    ) -> Result<(), KeyStoreError>;
}
