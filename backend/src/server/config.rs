//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use backend::domain::DEFAULT_CACHE_TTL;
use backend::outbound::demographics::DemographicEndpoints;
use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) endpoints: DemographicEndpoints,
    pub(crate) lookup_timeout: Duration,
    pub(crate) cache_ttl: Duration,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis_url: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration with no storage backends attached.
    ///
    /// Without a pool the persons ports are served by fixtures; without a
    /// Redis URL demographic stats are cached in process memory.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        endpoints: DemographicEndpoints,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            bind_addr,
            endpoints,
            lookup_timeout,
            cache_ttl: DEFAULT_CACHE_TTL,
            db_pool: None,
            redis_url: None,
        }
    }

    /// Attach a database connection pool for the person repository.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Use Redis at `url` for the demographic stats cache.
    #[must_use]
    pub fn with_redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
