//! Read-through / write-through itinerary cache.
//!
//! [`ItineraryCacheService`] is the concrete [`ItineraryResolver`]. For each
//! request it:
//! 1. Derives the [`ItineraryCacheKey`].
//! 2. Reads the key store. A read failure or an undecodable entry ends the
//!    request; a hit is returned as stored.
//! 3. On a miss, renders the prompt and calls the generator once (no retry).
//! 4. Writes the new record back with the configured TTL. A failed write is
//!    logged and the generated record is still returned.
//!
//! Concurrent misses on one key share a single generation unless coalescing
//! is switched off.

mod in_flight;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use self::in_flight::InFlightRegistry;
use super::ports::{
    ItineraryCacheKey, ItineraryError, ItineraryGenerator, ItineraryResolver, KeyStore,
};
use super::{
    ItineraryPrompt, ItineraryRecord, StoredItinerary, TravelRequest, decode_payload,
    encode_payload,
};

/// Lifetime of a cached itinerary.
pub const DEFAULT_ITINERARY_TTL: Duration = Duration::from_secs(3600);

/// Concrete implementation of [`ItineraryResolver`] backed by a key store and
/// a generator.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use itinerary_backend::domain::ItineraryCacheService;
/// use itinerary_backend::domain::ports::{ItineraryGenerator, KeyStore};
///
/// fn build(store: Arc<dyn KeyStore>, generator: Arc<dyn ItineraryGenerator>) {
///     let _service = ItineraryCacheService::new(store, generator).with_request_coalescing(false);
/// }
/// ```
pub struct ItineraryCacheService {
    writer: GenerationWriter,
    in_flight: Option<InFlightRegistry>,
}

/// Generation plus write-back, detached from the service so a coalesced
/// generation runs as its own task and still writes back after every waiting
/// caller has gone away.
#[derive(Clone)]
struct GenerationWriter {
    store: Arc<dyn KeyStore>,
    generator: Arc<dyn ItineraryGenerator>,
    ttl: Duration,
}

impl ItineraryCacheService {
    /// Create a service with the default TTL and request coalescing enabled.
    pub fn new(store: Arc<dyn KeyStore>, generator: Arc<dyn ItineraryGenerator>) -> Self {
        Self {
            writer: GenerationWriter {
                store,
                generator,
                ttl: DEFAULT_ITINERARY_TTL,
            },
            in_flight: Some(InFlightRegistry::default()),
        }
    }

    /// Override how long written itineraries stay cached.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.writer.ttl = ttl;
        self
    }

    /// Enable or disable sharing one generation between concurrent misses.
    #[must_use]
    pub fn with_request_coalescing(mut self, enabled: bool) -> Self {
        self.in_flight = enabled.then(InFlightRegistry::default);
        self
    }

    /// Return the record cached under `key`, if any.
    async fn read_cached(
        &self,
        key: &ItineraryCacheKey,
    ) -> Result<Option<ItineraryRecord>, ItineraryError> {
        let Some(payload) = self.writer.store.get(key).await? else {
            return Ok(None);
        };

        match decode_payload(&payload) {
            Ok(StoredItinerary::Current(record)) => Ok(Some(record)),
            Ok(StoredItinerary::Stale { version }) => {
                warn!(%key, %version, "cached itinerary has an outdated format; regenerating");
                Ok(None)
            }
            Err(err) => Err(ItineraryError::CorruptCache {
                key: key.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

impl GenerationWriter {
    async fn generate_and_store(
        self,
        key: ItineraryCacheKey,
        request: TravelRequest,
    ) -> Result<ItineraryRecord, ItineraryError> {
        let prompt = ItineraryPrompt::for_request(&request);
        info!(%key, "itinerary cache miss; generating");
        let plan = self.generator.generate(&prompt).await?;
        let record = ItineraryRecord::new(&request, plan);
        self.write_back(&key, &record).await;
        Ok(record)
    }

    async fn write_back(&self, key: &ItineraryCacheKey, record: &ItineraryRecord) {
        let payload = match encode_payload(record) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%key, %error, "failed to encode itinerary; skipping cache write");
                return;
            }
        };

        if let Err(error) = self.store.set(key, &payload, self.ttl).await {
            warn!(%key, %error, "itinerary cache write failed; returning generated plan");
        }
    }
}

#[async_trait]
impl ItineraryResolver for ItineraryCacheService {
    async fn resolve(&self, request: TravelRequest) -> Result<ItineraryRecord, ItineraryError> {
        let key = ItineraryCacheKey::for_request(&request);

        if let Some(record) = self.read_cached(&key).await? {
            debug!(%key, "itinerary cache hit");
            return Ok(record);
        }

        let writer = self.writer.clone();
        match &self.in_flight {
            Some(registry) => {
                let task_key = key.clone();
                let (outcome, joined) = registry
                    .run_or_join(&key, move || writer.generate_and_store(task_key, request))
                    .await;
                if joined {
                    debug!(%key, "joined in-flight itinerary generation");
                }
                outcome
            }
            None => writer.generate_and_store(key, request).await,
        }
    }
}
