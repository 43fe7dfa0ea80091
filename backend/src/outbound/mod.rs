//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **cache**: key stores for cached itineraries (Redis, in-memory)
//! - **generator**: OpenAI chat-completions itinerary generator
//!
//! Adapters are thin translators between domain types and the wire
//! representation of each backend. They contain no caching policy.

pub mod cache;
pub mod generator;
