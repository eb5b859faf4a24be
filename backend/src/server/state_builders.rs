//! Builders for the HTTP state and the person service behind it.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use backend::domain::ports::{
    FixturePersonsCommand, FixturePersonsQuery, PersonRepository, PersonStatsCache,
    PersonsCommand, PersonsQuery,
};
use backend::domain::{EnrichmentOrchestrator, PersonService};
use backend::inbound::http::state::HttpState;
use backend::outbound::cache::{InMemoryPersonStatsCache, RedisPersonStatsCache};
use backend::outbound::demographics::http_demographic_sources;
use backend::outbound::persistence::{DbPool, DieselPersonRepository};

use super::ServerConfig;

/// Expose one service through both driving ports.
fn state_from_service<R, C>(service: PersonService<R, C>) -> HttpState
where
    R: PersonRepository + 'static,
    C: PersonStatsCache + 'static,
{
    let service = Arc::new(service);
    let command: Arc<dyn PersonsCommand> = service.clone();
    let query: Arc<dyn PersonsQuery> = service;
    HttpState::new(command, query)
}

fn person_service<C>(
    config: &ServerConfig,
    pool: &DbPool,
    cache: Arc<C>,
    enrichment: EnrichmentOrchestrator,
) -> PersonService<DieselPersonRepository, C> {
    let repository = Arc::new(DieselPersonRepository::new(
        pool.clone(),
        Arc::new(DefaultClock),
    ));
    PersonService::new(repository, cache, enrichment).with_cache_ttl(config.cache_ttl)
}

/// Build HTTP state using real adapters when a pool is available, otherwise
/// using fixture implementations.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the demographic HTTP client or the Redis
/// pool cannot be constructed.
pub(super) async fn build_http_state(
    config: &ServerConfig,
) -> std::io::Result<web::Data<HttpState>> {
    let Some(pool) = &config.db_pool else {
        warn!("no database pool configured; serving fixture persons");
        return Ok(web::Data::new(HttpState::new(
            Arc::new(FixturePersonsCommand),
            Arc::new(FixturePersonsQuery),
        )));
    };

    let sources = http_demographic_sources(config.endpoints.clone(), config.lookup_timeout)
        .map_err(|err| std::io::Error::other(format!("demographic client: {err}")))?;
    let enrichment = EnrichmentOrchestrator::new(sources, config.lookup_timeout);

    let state = match config.redis_url.as_deref() {
        Some(url) => {
            let cache = RedisPersonStatsCache::connect(url)
                .await
                .map_err(|err| std::io::Error::other(format!("redis cache: {err}")))?;
            info!("person stats cached in redis");
            state_from_service(person_service(config, pool, Arc::new(cache), enrichment))
        }
        None => {
            warn!("no redis url configured; caching person stats in memory");
            let cache = InMemoryPersonStatsCache::new(Arc::new(DefaultClock));
            state_from_service(person_service(config, pool, Arc::new(cache), enrichment))
        }
    };
    Ok(web::Data::new(state))
}
