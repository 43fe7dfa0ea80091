//! Builders turning settings into port implementations.

use std::sync::Arc;

use itinerary_backend::domain::ItineraryCacheService;
use itinerary_backend::domain::ports::ItineraryResolver;
use itinerary_backend::outbound::cache::{RedisKeyStore, RedisPoolConfig};
use itinerary_backend::outbound::generator::OpenAiItineraryGenerator;
use itinerary_backend::settings::AppSettings;
use tracing::info;

/// Build the Redis- and OpenAI-backed itinerary resolver.
///
/// The Redis pool connects lazily, so an unreachable server shows up as
/// failed requests rather than a startup error.
///
/// # Errors
/// Returns [`std::io::Error`] when the Redis URL is invalid or the HTTP client
/// cannot be built.
pub fn build_itinerary_resolver(
    settings: &AppSettings,
) -> std::io::Result<Arc<dyn ItineraryResolver>> {
    let store = RedisKeyStore::connect(&RedisPoolConfig::new(settings.redis_url.as_str()))
        .map_err(std::io::Error::other)?;
    let generator =
        OpenAiItineraryGenerator::new(settings.openai.clone()).map_err(std::io::Error::other)?;

    info!(
        model = %settings.openai.model,
        ttl_secs = settings.cache_ttl.as_secs(),
        coalesce = settings.coalesce_requests,
        "itinerary resolver configured"
    );

    Ok(Arc::new(
        ItineraryCacheService::new(Arc::new(store), Arc::new(generator))
            .with_ttl(settings.cache_ttl)
            .with_request_coalescing(settings.coalesce_requests),
    ))
}
