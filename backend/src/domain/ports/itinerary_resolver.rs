//! Driving port for resolving travel requests into itineraries.
//!
//! Inbound adapters call [`ItineraryResolver::resolve`] without knowing
//! whether the answer comes from the cache or from a fresh generation.

use async_trait::async_trait;
use tracing::error;

use super::{GenerationError, KeyStoreError};
use crate::domain::{Error, ItineraryRecord, TravelRequest, TravelRequestValidationError};

/// Failures raised while resolving an itinerary.
///
/// Only [`ItineraryError::Validation`] is the caller's fault; every other
/// variant is a server fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryError {
    /// The request was malformed.
    #[error(transparent)]
    Validation(#[from] TravelRequestValidationError),
    /// The key store could not be read.
    #[error("itinerary cache read failed: {0}")]
    Store(#[from] KeyStoreError),
    /// A cached entry exists but cannot be decoded.
    #[error("cached itinerary under key '{key}' is corrupt: {message}")]
    CorruptCache { key: String, message: String },
    /// The generator failed.
    #[error("itinerary generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// The background generation task panicked or was cancelled.
    #[error("itinerary generation task ended abnormally: {message}")]
    Interrupted { message: String },
}

impl From<ItineraryError> for Error {
    fn from(err: ItineraryError) -> Self {
        match err {
            ItineraryError::Validation(validation) => {
                Error::invalid_request(validation.to_string()).with_details(validation.details())
            }
            other => {
                // Server faults keep their cause in logs only.
                error!(error = %other, "itinerary resolution failed");
                Error::internal(other.to_string())
            }
        }
    }
}

/// Resolve a travel request to an itinerary record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItineraryResolver: Send + Sync {
    /// Return the cached itinerary for `request`, generating it on a miss.
    ///
    /// # Errors
    ///
    /// - [`ItineraryError::Store`] when the cache cannot be read.
    /// - [`ItineraryError::CorruptCache`] when a cached entry is unreadable.
    /// - [`ItineraryError::Generation`] when generation fails.
    async fn resolve(&self, request: TravelRequest) -> Result<ItineraryRecord, ItineraryError>;
}

/// Fixture implementation for handler tests and local wiring.
///
/// Answers every request with a canned plan and touches no infrastructure.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureItineraryResolver;

/// Plan text returned by [`FixtureItineraryResolver`].
pub const FIXTURE_PLAN: &str = "Day 1: Arrive and explore the old town.";

#[async_trait]
impl ItineraryResolver for FixtureItineraryResolver {
    async fn resolve(&self, request: TravelRequest) -> Result<ItineraryRecord, ItineraryError> {
        Ok(ItineraryRecord::new(&request, FIXTURE_PLAN))
    }
}
