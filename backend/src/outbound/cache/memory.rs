//! Process-local stats cache with expiry driven by an injected clock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::PersonStats;
use crate::domain::ports::{PersonStatsCache, PersonStatsCacheError, PersonStatsCacheKey};

struct Entry {
    stats: PersonStats,
    expires_at: DateTime<Utc>,
}

/// In-memory [`PersonStatsCache`].
///
/// Expired entries read as misses. They are dropped when read and swept on
/// every write, so keys that are never read again do not accumulate.
pub struct InMemoryPersonStatsCache {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryPersonStatsCache {
    /// Create an empty cache reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, PersonStatsCacheError> {
        self.entries
            .lock()
            .map_err(|_| PersonStatsCacheError::backend("in-memory cache lock poisoned"))
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[async_trait]
impl PersonStatsCache for InMemoryPersonStatsCache {
    async fn get(&self, key: &PersonStatsCacheKey) -> Result<PersonStats, PersonStatsCacheError> {
        let now = self.clock.utc();
        let mut entries = self.lock_entries()?;
        match entries.get(key.as_str()) {
            Some(entry) if entry.expires_at > now => Ok(entry.stats.clone()),
            Some(_) => {
                entries.remove(key.as_str());
                Err(PersonStatsCacheError::not_found(key.as_str()))
            }
            None => Err(PersonStatsCacheError::not_found(key.as_str())),
        }
    }

    async fn set(
        &self,
        key: &PersonStatsCacheKey,
        stats: &PersonStats,
        ttl: Duration,
    ) -> Result<(), PersonStatsCacheError> {
        let now = self.clock.utc();
        let mut entries = self.lock_entries()?;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.as_str().to_owned(),
            Entry {
                stats: stats.clone(),
                expires_at: expiry(now, ttl),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};

    const TTL: Duration = Duration::from_secs(5 * 60 * 60);

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn advance(&self, delta: Duration) {
            let delta = TimeDelta::from_std(delta).expect("delta fits");
            *self.0.lock().expect("clock mutex") += delta;
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock mutex")
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Arc::new(MutableClock(Mutex::new(start)))
    }

    fn key(name: &str) -> PersonStatsCacheKey {
        PersonStatsCacheKey::new(name).expect("valid key")
    }

    fn stats() -> PersonStats {
        PersonStats::new(32, "GB", "male").expect("valid stats")
    }

    #[rstest]
    #[tokio::test]
    async fn stored_stats_are_returned(clock: Arc<MutableClock>) {
        let cache = InMemoryPersonStatsCache::new(clock);
        cache.set(&key("Oliver"), &stats(), TTL).await.expect("set");

        let cached = cache.get(&key("Oliver")).await.expect("hit");

        assert_eq!(cached, stats());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_key_is_a_miss(clock: Arc<MutableClock>) {
        let cache = InMemoryPersonStatsCache::new(clock);

        let err = cache.get(&key("Nobody")).await.expect_err("miss");

        assert!(err.is_miss(), "{err}");
    }

    #[rstest]
    #[tokio::test]
    async fn keys_are_case_sensitive(clock: Arc<MutableClock>) {
        let cache = InMemoryPersonStatsCache::new(clock);
        cache.set(&key("Oliver"), &stats(), TTL).await.expect("set");

        let err = cache.get(&key("oliver")).await.expect_err("miss");

        assert!(err.is_miss());
    }

    #[rstest]
    #[tokio::test]
    async fn entries_expire_after_ttl(clock: Arc<MutableClock>) {
        let cache = InMemoryPersonStatsCache::new(clock.clone());
        cache.set(&key("Oliver"), &stats(), TTL).await.expect("set");

        clock.advance(TTL - Duration::from_secs(1));
        cache.get(&key("Oliver")).await.expect("still fresh");

        clock.advance(Duration::from_secs(1));
        let err = cache.get(&key("Oliver")).await.expect_err("expired");
        assert!(err.is_miss());
    }

    #[rstest]
    #[tokio::test]
    async fn overwriting_replaces_stats_and_resets_expiry(clock: Arc<MutableClock>) {
        let cache = InMemoryPersonStatsCache::new(clock.clone());
        cache.set(&key("Oliver"), &stats(), TTL).await.expect("set");
        clock.advance(TTL - Duration::from_secs(60));

        let replacement = PersonStats::new(40, "IE", "male").expect("valid stats");
        cache
            .set(&key("Oliver"), &replacement, TTL)
            .await
            .expect("overwrite");
        clock.advance(Duration::from_secs(120));

        let cached = cache.get(&key("Oliver")).await.expect("hit");
        assert_eq!(cached, replacement);
    }

    #[rstest]
    #[tokio::test]
    async fn writes_sweep_expired_entries(clock: Arc<MutableClock>) {
        let cache = InMemoryPersonStatsCache::new(clock.clone());
        cache.set(&key("Oliver"), &stats(), TTL).await.expect("set");
        cache
            .set(&key("Amelia"), &stats(), TTL * 2)
            .await
            .expect("set");
        clock.advance(TTL);

        cache.set(&key("Harry"), &stats(), TTL).await.expect("set");

        let entries = cache.lock_entries().expect("lock");
        let mut keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["Amelia", "Harry"]);
    }

    #[rstest]
    fn huge_ttls_saturate() {
        let now = Utc::now();
        assert_eq!(expiry(now, Duration::MAX), DateTime::<Utc>::MAX_UTC);
    }
}
