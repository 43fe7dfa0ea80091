//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureItineraryResolver, ItineraryResolver};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub itineraries: Arc<dyn ItineraryResolver>,
}

impl HttpState {
    /// Construct state from the itinerary resolver.
    pub fn new(itineraries: Arc<dyn ItineraryResolver>) -> Self {
        Self { itineraries }
    }
}

impl Default for HttpState {
    /// State answering every request with the fixture plan.
    fn default() -> Self {
        Self::new(Arc::new(FixtureItineraryResolver))
    }
}
