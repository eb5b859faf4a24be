//! Person stats cache adapters.
//!
//! - [`RedisPersonStatsCache`]: production adapter over a `bb8-redis` pool.
//!   Entries are JSON documents written with `SET key value EX ttl`.
//! - [`InMemoryPersonStatsCache`]: process-local adapter with clock-driven
//!   expiry, used when no Redis URL is configured and in tests.

mod memory;
mod redis;

pub use memory::InMemoryPersonStatsCache;
pub use redis::RedisPersonStatsCache;
