//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`KeyStore`], [`ItineraryGenerator`]) are implemented by
//! outbound adapters; the driving port ([`ItineraryResolver`]) is called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod itinerary_generator;
mod itinerary_resolver;
mod key_store;

pub use cache_key::ItineraryCacheKey;
#[cfg(test)]
pub use itinerary_generator::MockItineraryGenerator;
pub use itinerary_generator::{GenerationError, ItineraryGenerator};
#[cfg(test)]
pub use itinerary_resolver::MockItineraryResolver;
pub use itinerary_resolver::{
    FIXTURE_PLAN, FixtureItineraryResolver, ItineraryError, ItineraryResolver,
};
#[cfg(test)]
pub use key_store::MockKeyStore;
pub use key_store::{KeyStore, KeyStoreError};
