//! Key store adapters backing the itinerary cache.
//!
//! - [`RedisKeyStore`]: production adapter over a `bb8` Redis pool.
//! - [`MemoryKeyStore`]: process-local map with clock-driven expiry, used by
//!   tests and local runs without Redis.

mod memory_store;
mod redis_store;

pub use memory_store::MemoryKeyStore;
pub use redis_store::{RedisKeyStore, RedisPoolConfig};
