//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use itinerary_backend::domain::ports::{FixtureItineraryResolver, ItineraryResolver};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) itineraries: Arc<dyn ItineraryResolver>,
}

impl ServerConfig {
    /// Construct a configuration answering with the fixture resolver until a
    /// real one is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            itineraries: Arc::new(FixtureItineraryResolver),
        }
    }

    /// Attach the resolver backing `POST /api/itinerary`.
    #[must_use]
    pub fn with_itinerary_resolver(mut self, itineraries: Arc<dyn ItineraryResolver>) -> Self {
        self.itineraries = itineraries;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
