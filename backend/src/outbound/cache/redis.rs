//! Redis-backed stats cache.
//!
//! Values are the JSON form of [`PersonStats`]
//! (`{"age":32,"nationality":"GB","gender":"male"}`) stored under the raw
//! given name. A missing key is a miss; anything else that goes wrong is a
//! backend or serialization error which callers treat as a miss.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, RunError};
use bb8_redis::redis::{AsyncCommands, RedisError};
use tracing::debug;

use crate::domain::PersonStats;
use crate::domain::ports::{PersonStatsCache, PersonStatsCacheError, PersonStatsCacheKey};

/// [`PersonStatsCache`] over a pooled Redis connection.
#[derive(Clone)]
pub struct RedisPersonStatsCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisPersonStatsCache {
    /// Wrap an existing connection pool.
    pub fn new(pool: Pool<RedisConnectionManager>) -> Self {
        Self { pool }
    }

    /// Build a pool for `redis_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersonStatsCacheError::Backend`] when the URL is invalid or
    /// the pool cannot be created.
    pub async fn connect(redis_url: &str) -> Result<Self, PersonStatsCacheError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(map_redis_error)?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(map_redis_error)?;
        Ok(Self::new(pool))
    }
}

fn map_redis_error(error: RedisError) -> PersonStatsCacheError {
    PersonStatsCacheError::backend(error.to_string())
}

fn map_pool_error(error: RunError<RedisError>) -> PersonStatsCacheError {
    match error {
        RunError::User(error) => map_redis_error(error),
        RunError::TimedOut => PersonStatsCacheError::backend("redis pool timed out"),
    }
}

fn encode(stats: &PersonStats) -> Result<String, PersonStatsCacheError> {
    serde_json::to_string(stats)
        .map_err(|error| PersonStatsCacheError::serialization(error.to_string()))
}

fn decode(payload: &str) -> Result<PersonStats, PersonStatsCacheError> {
    serde_json::from_str(payload)
        .map_err(|error| PersonStatsCacheError::serialization(error.to_string()))
}

/// Redis rejects `EX 0`, so sub-second TTLs round up to one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl PersonStatsCache for RedisPersonStatsCache {
    async fn get(&self, key: &PersonStatsCacheKey) -> Result<PersonStats, PersonStatsCacheError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let connection = &mut *conn;
        let payload: Option<String> = connection
            .get(key.as_str())
            .await
            .map_err(map_redis_error)?;
        match payload {
            Some(payload) => decode(&payload),
            None => Err(PersonStatsCacheError::not_found(key.as_str())),
        }
    }

    async fn set(
        &self,
        key: &PersonStatsCacheKey,
        stats: &PersonStats,
        ttl: Duration,
    ) -> Result<(), PersonStatsCacheError> {
        let payload = encode(stats)?;
        let seconds = ttl_seconds(ttl);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let connection = &mut *conn;
        let _: () = connection
            .set_ex(key.as_str(), payload, seconds)
            .await
            .map_err(map_redis_error)?;
        debug!(%key, seconds, "person stats cached in redis");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn payload_uses_the_shared_wire_format() {
        let stats = PersonStats::new(32, "GB", "male").expect("valid stats");

        let payload = encode(&stats).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&payload).expect("json");

        assert_eq!(
            value,
            serde_json::json!({"age": 32, "nationality": "GB", "gender": "male"})
        );
        assert_eq!(decode(&payload).expect("decode"), stats);
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::missing_field(r#"{"age":32,"gender":"male"}"#)]
    #[case::negative_age(r#"{"age":-1,"nationality":"GB","gender":"male"}"#)]
    #[case::blank_country(r#"{"age":32,"nationality":"","gender":"male"}"#)]
    fn corrupt_payloads_are_serialization_errors(#[case] payload: &str) {
        let err = decode(payload).expect_err("corrupt payload");
        assert!(
            matches!(err, PersonStatsCacheError::Serialization { .. }),
            "{err}"
        );
        assert!(!err.is_miss());
    }

    #[rstest]
    #[case(Duration::from_millis(10), 1)]
    #[case(Duration::from_secs(0), 1)]
    #[case(Duration::from_secs(18_000), 18_000)]
    fn ttl_is_whole_seconds_and_never_zero(#[case] ttl: Duration, #[case] expected: u64) {
        assert_eq!(ttl_seconds(ttl), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_url_is_a_backend_error() {
        let err = RedisPersonStatsCache::connect("definitely not a url")
            .await
            .err()
            .expect("invalid url rejected");
        assert!(matches!(err, PersonStatsCacheError::Backend { .. }), "{err}");
    }
}
