//! Port interface for the cache-aside store of demographic stats.
use std::time::Duration;

use async_trait::async_trait;

use super::{PersonStatsCacheKey, define_port_error};
use crate::domain::PersonStats;

define_port_error! {
    /// Errors surfaced by person stats cache adapters.
    pub enum PersonStatsCacheError {
        /// No live entry exists for the key (never set, or expired).
        NotFound { key: String } => "no cached person stats for {key}",
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "person stats cache backend failure: {message}",
        /// Serialisation or deserialisation of cached content failed.
        Serialization { message: String } => "person stats cache serialisation failed: {message}",
    }
}

impl PersonStatsCacheError {
    /// Whether this error is a plain miss rather than a backend failure.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonStatsCache: Send + Sync {
    /// Read the live entry for `key`, failing with `NotFound` when absent.
    async fn get(&self, key: &PersonStatsCacheKey) -> Result<PersonStats, PersonStatsCacheError>;

    /// Store `stats` under `key`, replacing any entry and resetting its expiry.
    async fn set(
        &self,
        key: &PersonStatsCacheKey,
        stats: &PersonStats,
        ttl: Duration,
    ) -> Result<(), PersonStatsCacheError>;
}
