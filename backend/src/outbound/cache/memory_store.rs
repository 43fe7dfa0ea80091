//! In-memory [`KeyStore`] with clock-driven expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{ItineraryCacheKey, KeyStore, KeyStoreError};

struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Process-local key store.
///
/// Entries read back as absent from the instant `written_at + ttl` is reached.
/// Expired entries are dropped when their key is read and swept on every
/// write, so the map only holds keys written within the last TTL.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use itinerary_backend::outbound::cache::MemoryKeyStore;
/// use mockable::DefaultClock;
///
/// let store = MemoryKeyStore::new(Arc::new(DefaultClock));
/// assert!(store.is_empty());
/// ```
pub struct MemoryKeyStore {
    clock: Arc<dyn Clock + Send + Sync>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryKeyStore {
    /// Create an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of entries that have not yet expired.
    pub fn len(&self) -> usize {
        let now = self.clock.utc();
        self.entries()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// Whether no unexpired entries remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn get(&self, key: &ItineraryCacheKey) -> Result<Option<String>, KeyStoreError> {
        let now = self.clock.utc();
        let mut entries = self.entries();
        match entries.get(key.as_str()) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key.as_str());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &ItineraryCacheKey,
        value: &str,
        ttl: Duration,
    ) -> Result<(), KeyStoreError> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|err| KeyStoreError::command(format!("ttl out of range: {err}")))?;
        let now = self.clock.utc();
        let expires_at = now + ttl;
        let mut entries = self.entries();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.as_str().to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::TravelRequest;
    use crate::test_support::MutableClock;

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::new(
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        ))
    }

    fn key(destination: &str) -> ItineraryCacheKey {
        let request =
            TravelRequest::try_new(destination, 1, vec!["art".into()]).expect("valid request");
        ItineraryCacheKey::for_request(&request)
    }

    #[rstest]
    #[tokio::test]
    async fn missing_keys_read_as_absent(clock: Arc<MutableClock>) {
        let store = MemoryKeyStore::new(clock);
        assert_eq!(store.get(&key("Paris")).await, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn entries_live_until_ttl_elapses(clock: Arc<MutableClock>) {
        let store = MemoryKeyStore::new(clock.clone());
        store
            .set(&key("Paris"), "v1:{}", Duration::from_secs(10))
            .await
            .expect("set succeeds");

        clock.advance(Duration::from_secs(9));
        assert_eq!(
            store.get(&key("Paris")).await,
            Ok(Some("v1:{}".to_owned()))
        );

        clock.advance(Duration::from_secs(1));
        assert_eq!(store.get(&key("Paris")).await, Ok(None));
        assert!(store.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn set_replaces_value_and_restarts_ttl(clock: Arc<MutableClock>) {
        let store = MemoryKeyStore::new(clock.clone());
        let ttl = Duration::from_secs(10);
        store.set(&key("Rome"), "old", ttl).await.expect("first set");
        clock.advance(Duration::from_secs(8));
        store.set(&key("Rome"), "new", ttl).await.expect("second set");
        clock.advance(Duration::from_secs(8));

        assert_eq!(store.get(&key("Rome")).await, Ok(Some("new".to_owned())));
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn len_ignores_expired_entries(clock: Arc<MutableClock>) {
        let store = MemoryKeyStore::new(clock.clone());
        store
            .set(&key("Oslo"), "short", Duration::from_secs(5))
            .await
            .expect("set short");
        store
            .set(&key("Bergen"), "long", Duration::from_secs(50))
            .await
            .expect("set long");
        clock.advance(Duration::from_secs(5));

        assert_eq!(store.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn writes_sweep_expired_entries_for_other_keys(clock: Arc<MutableClock>) {
        let store = MemoryKeyStore::new(clock.clone());
        let ttl = Duration::from_secs(5);
        for destination in ["Oslo", "Bergen", "Tromso"] {
            store.set(&key(destination), "v1:{}", ttl).await.expect("set");
        }
        clock.advance(ttl);

        store.set(&key("Lima"), "v1:{}", ttl).await.expect("set after expiry");

        assert_eq!(store.entries().len(), 1);
        assert!(store.entries().contains_key(key("Lima").as_str()));
    }
}
