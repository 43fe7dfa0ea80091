//! Domain primitives, ports and the itinerary cache service.
//!
//! Purpose: Define the strongly typed request and record types, the ports
//! implemented by outbound adapters, and the service that ties them together.
//! Nothing in here knows about HTTP, Redis or any particular generator.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - TravelRequest — validated itinerary request.
//! - ItineraryRecord — generated plan plus the request that produced it.
//! - ItineraryCacheService — read-through/write-through resolver.

pub mod error;
pub mod itinerary;
pub mod itinerary_cache;
pub mod itinerary_prompt;
pub mod ports;
pub mod trace_id;
pub mod travel_request;

pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::itinerary::{
    ItineraryRecord, PAYLOAD_VERSION, PayloadDecodeError, StoredItinerary, decode_payload,
    encode_payload,
};
pub use self::itinerary_cache::{DEFAULT_ITINERARY_TTL, ItineraryCacheService};
pub use self::itinerary_prompt::ItineraryPrompt;
pub use self::trace_id::TraceId;
pub use self::travel_request::{TravelRequest, TravelRequestValidationError};
